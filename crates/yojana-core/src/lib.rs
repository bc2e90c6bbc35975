pub mod analysis;
pub mod error;
pub mod inputs;
pub mod metrics;
pub mod projection;
pub mod scheme;
pub mod time_value;
pub mod types;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::YojanaError;
pub use inputs::{CalculationOptions, ProjectInputs};
pub use scheme::SchemeConstants;
pub use types::*;

/// Standard result type for all scheme calculations
pub type YojanaResult<T> = Result<T, YojanaError>;
