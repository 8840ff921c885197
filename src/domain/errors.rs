//! Domain layer error types
//!
//! Runtime widget operations are total; these errors only come out of
//! construction (bad parameters, bad selector strings).

use thiserror::Error;

/// Main domain error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A rotator needs at least one item to rotate through
    #[error("Rotator needs at least one item")]
    EmptyRotator,

    /// Marquee geometry that cannot produce a loop
    #[error("Invalid marquee: {0}")]
    InvalidMarquee(String),

    /// Selector text that does not parse
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DomainError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
