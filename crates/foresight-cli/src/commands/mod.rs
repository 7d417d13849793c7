//! Command implementations.

pub mod consolidate;
pub mod credentials;
pub mod extract;
pub mod run;

pub use self::consolidate::execute_consolidate;
pub use self::credentials::execute_credentials;
pub use self::extract::execute_extract;
pub use self::run::execute_run;
