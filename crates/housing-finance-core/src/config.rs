use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HousingFinanceError;
use crate::types::{Percent, Rate};
use crate::HousingFinanceResult;

/// Numeric policy knobs shared by every calculation.
///
/// Deserialises from partial JSON: any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// Loan term used when a caller does not supply one
    pub default_term_years: u32,
    /// Closing costs as a fraction of purchase price (0.03 = 3%)
    pub closing_cost_rate: Rate,
    /// Annual rate used when a caller does not supply one (4.5 = 4.5%)
    pub default_annual_rate_pct: Percent,
    /// Share of gross monthly income available for housing plus debts
    pub max_debt_to_income: Rate,
    /// Number of schedule rows shown before output is truncated
    pub display_payments_limit: usize,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            default_term_years: 30,
            closing_cost_rate: dec!(0.03),
            default_annual_rate_pct: dec!(4.5),
            max_debt_to_income: dec!(0.36),
            display_payments_limit: 24,
        }
    }
}

impl FinanceConfig {
    pub fn validate(&self) -> HousingFinanceResult<()> {
        if self.default_term_years == 0 {
            return Err(HousingFinanceError::InvalidInput {
                field: "default_term_years".into(),
                reason: "Default loan term must be at least 1 year".into(),
            });
        }

        if self.closing_cost_rate < Decimal::ZERO || self.closing_cost_rate > Decimal::ONE {
            return Err(HousingFinanceError::InvalidInput {
                field: "closing_cost_rate".into(),
                reason: "Closing cost rate must be a fraction between 0 and 1".into(),
            });
        }

        if self.max_debt_to_income < Decimal::ZERO || self.max_debt_to_income > Decimal::ONE {
            return Err(HousingFinanceError::InvalidInput {
                field: "max_debt_to_income".into(),
                reason: "Debt-to-income limit must be a fraction between 0 and 1".into(),
            });
        }

        if self.default_annual_rate_pct < Decimal::ZERO {
            return Err(HousingFinanceError::InvalidInput {
                field: "default_annual_rate_pct".into(),
                reason: "Default annual rate cannot be negative".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FinanceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_term_years, 30);
        assert_eq!(config.closing_cost_rate, dec!(0.03));
        assert_eq!(config.default_annual_rate_pct, dec!(4.5));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FinanceConfig =
            serde_json::from_str(r#"{"closing_cost_rate": "0.05"}"#).unwrap();
        assert_eq!(config.closing_cost_rate, dec!(0.05));
        assert_eq!(config.default_term_years, 30);
        assert_eq!(config.display_payments_limit, 24);
    }

    #[test]
    fn test_rejects_closing_cost_above_one() {
        let config = FinanceConfig {
            closing_cost_rate: dec!(1.5),
            ..FinanceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("closing_cost_rate"));
    }

    #[test]
    fn test_rejects_zero_default_term() {
        let config = FinanceConfig {
            default_term_years: 0,
            ..FinanceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
