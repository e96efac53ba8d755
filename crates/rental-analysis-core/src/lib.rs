pub mod error;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "form")]
pub mod form;

pub use error::RentalAnalysisError;
pub use types::*;

/// Standard result type for all rental-analysis operations
pub type RentalAnalysisResult<T> = Result<T, RentalAnalysisError>;
