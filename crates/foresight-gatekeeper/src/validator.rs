//! Statement review logic

use crate::normalize::{is_canonical, normalize};
use crate::ValidationConfig;
use foresight_domain::{FinancialMetric, ForwardLookingStatement, MetricValues};
use tracing::{debug, warn};

/// Result of reviewing one statement
#[derive(Debug, Clone)]
pub struct Review {
    /// Overall outcome
    pub status: ReviewStatus,

    /// The statement after repairs and removals
    pub statement: ForwardLookingStatement,

    /// Everything the review changed or objected to
    pub issues: Vec<ValueIssue>,
}

impl Review {
    /// Whether the statement should be persisted
    pub fn is_accepted(&self) -> bool {
        self.status != ReviewStatus::Rejected
    }
}

/// Review status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// All values were already canonical
    Accepted,

    /// At least one value was repaired or removed
    Repaired,

    /// Statement should not be persisted
    Rejected,
}

/// A finding from the review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueIssue {
    /// Value rewritten to canonical form
    Repaired {
        /// Metric the value belongs to
        metric: FinancialMetric,
        /// Value as returned by the oracle
        original: String,
        /// Canonical replacement
        canonical: String,
    },

    /// Value removed because it could not be made canonical
    Dropped {
        /// Metric the value belonged to
        metric: FinancialMetric,
        /// Value as returned by the oracle
        original: String,
    },

    /// Value kept although it is not canonical
    NonCanonical {
        /// Metric the value belongs to
        metric: FinancialMetric,
        /// The kept value
        value: String,
    },

    /// The statement's own category carries no value
    MissingCategoryValue(FinancialMetric),

    /// The statement's sentence is blank
    EmptySentence,
}

impl ValueIssue {
    fn rejects(&self) -> bool {
        matches!(self, Self::MissingCategoryValue(_) | Self::EmptySentence)
    }
}

/// The Gatekeeper reviews statements before they are persisted
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Review a statement against the normalization contract
    pub fn review(&self, statement: ForwardLookingStatement) -> Review {
        let mut issues = Vec::new();
        let mut values = MetricValues::new();

        for (metric, raw) in statement.values.iter() {
            let unit = metric.unit();
            if is_canonical(raw, unit) {
                values.set(metric, raw);
                continue;
            }

            let repaired = if self.config.repair_values {
                normalize(raw, unit).filter(|candidate| is_canonical(candidate, unit))
            } else {
                None
            };

            match repaired {
                Some(canonical) => {
                    debug!("Repaired {} value {:?} -> {:?}", metric, raw, canonical);
                    values.set(metric, canonical.clone());
                    issues.push(ValueIssue::Repaired {
                        metric,
                        original: raw.to_string(),
                        canonical,
                    });
                }
                None if self.config.drop_unrepairable => {
                    warn!("Dropping non-canonical {} value {:?}", metric, raw);
                    issues.push(ValueIssue::Dropped {
                        metric,
                        original: raw.to_string(),
                    });
                }
                None => {
                    values.set(metric, raw);
                    issues.push(ValueIssue::NonCanonical {
                        metric,
                        value: raw.to_string(),
                    });
                }
            }
        }

        let statement = ForwardLookingStatement { values, ..statement };

        if self.config.require_category_value && statement.category_value().is_none() {
            issues.push(ValueIssue::MissingCategoryValue(statement.category));
        }
        if self.config.require_sentence && statement.sentence.trim().is_empty() {
            issues.push(ValueIssue::EmptySentence);
        }

        let status = if issues.iter().any(ValueIssue::rejects) {
            ReviewStatus::Rejected
        } else if issues.is_empty() {
            ReviewStatus::Accepted
        } else {
            ReviewStatus::Repaired
        };

        Review {
            status,
            statement,
            issues,
        }
    }
}
