use thiserror::Error;

#[derive(Debug, Error)]
pub enum HousingFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),
}
