pub mod amortization;
pub mod config;
pub mod error;
pub mod mortgage;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "affordability")]
pub mod affordability;

pub use config::FinanceConfig;
pub use error::HousingFinanceError;
pub use types::*;

/// Standard result type for all housing-finance operations
pub type HousingFinanceResult<T> = Result<T, HousingFinanceError>;
