use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YojanaError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Shape mismatch in {context}: expected {expected} yearly values, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Year index mismatch in {context}: position {position} holds year {found}, expected year {expected}")]
    YearIndexMismatch {
        context: String,
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Investment of {investment} is never recouped within {horizon} years (cumulative return {recovered})")]
    NeverRecouped {
        investment: Decimal,
        recovered: Decimal,
        horizon: u32,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl YojanaError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            YojanaError::InvalidInput { .. } => "invalid_input",
            YojanaError::ShapeMismatch { .. } | YojanaError::YearIndexMismatch { .. } => {
                "shape_mismatch"
            }
            YojanaError::Domain(_) => "domain",
            YojanaError::NeverRecouped { .. } => "never_recouped",
            YojanaError::DivisionByZero { .. } => "division_by_zero",
            YojanaError::SerializationError(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for YojanaError {
    fn from(e: serde_json::Error) -> Self {
        YojanaError::SerializationError(e.to_string())
    }
}
