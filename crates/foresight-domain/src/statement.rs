//! Forward-looking statements returned by the extraction oracle

use crate::metric::{FinancialMetric, MetricValues};

/// One extracted projection about a future financial period
///
/// Only the field matching `category` is expected to be populated, but other
/// metric values are carried through when the oracle supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardLookingStatement {
    /// Metric the statement is about
    pub category: FinancialMetric,
    /// The sentence the projection was taken from
    pub sentence: String,
    /// Speaker, or empty when unknown
    pub speaker: String,
    /// Normalized metric values
    pub values: MetricValues,
}

impl ForwardLookingStatement {
    /// Create a statement with no values
    pub fn new(category: FinancialMetric, sentence: impl Into<String>) -> Self {
        Self {
            category,
            sentence: sentence.into(),
            speaker: String::new(),
            values: MetricValues::new(),
        }
    }

    /// Set the speaker
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    /// Set a metric value
    pub fn with_value(mut self, metric: FinancialMetric, value: impl Into<String>) -> Self {
        self.values.set(metric, value);
        self
    }

    /// Value of the statement's own category, if any
    pub fn category_value(&self) -> Option<&str> {
        self.values.get(self.category)
    }
}
