//! Foresight Gatekeeper
//!
//! Enforces the value-normalization contract on statements returned by the
//! extraction oracle instead of trusting the oracle blindly.
//!
//! The Gatekeeper provides:
//! - A deterministic phrase normalizer (`"approximately $1,500 million"` → `"1500000000"`)
//! - Canonical-form checks per metric unit (`%` required, forbidden or optional)
//! - Repair of near-miss values and removal of unrepairable ones
//!
//! # Examples
//!
//! ```
//! use foresight_domain::{FinancialMetric, ForwardLookingStatement};
//! use foresight_gatekeeper::{Gatekeeper, ReviewStatus};
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let statement = ForwardLookingStatement::new(FinancialMetric::GrossMargin, "Margins near 28.")
//!     .with_value(FinancialMetric::GrossMargin, "28");
//!
//! let review = gatekeeper.review(statement);
//! assert_eq!(review.status, ReviewStatus::Repaired);
//! assert_eq!(review.statement.category_value(), Some("28%"));
//! ```

#![warn(missing_docs)]

mod config;
mod normalize;
mod validator;

pub use config::ValidationConfig;
pub use normalize::{format_number, is_canonical, normalize};
pub use validator::{Gatekeeper, Review, ReviewStatus, ValueIssue};
