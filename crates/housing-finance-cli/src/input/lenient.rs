use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::str::FromStr;

/// A numeric flag that never fails to parse.
///
/// Text that is not a number becomes zero; the rejected text is kept so the
/// substitution can be logged once logging is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    value: Decimal,
    rejected: Option<String>,
}

impl FromStr for Amount {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().replace(',', "");
        Ok(match Decimal::from_str(&trimmed) {
            Ok(value) => Amount {
                value,
                rejected: None,
            },
            Err(_) => Amount {
                value: Decimal::ZERO,
                rejected: Some(s.to_string()),
            },
        })
    }
}

impl Amount {
    pub fn resolve(&self, field: &str) -> Decimal {
        if let Some(raw) = &self.rejected {
            tracing::warn!(field, input = %raw, "not a number, using 0");
        }
        self.value
    }
}

/// A whole-year count parsed like [`Amount`], truncated toward zero.
/// Negative or out-of-range counts become 0.
#[derive(Debug, Clone, PartialEq)]
pub struct YearCount(Amount);

impl FromStr for YearCount {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::from_str(s).map(YearCount)
    }
}

impl YearCount {
    pub fn resolve(&self, field: &str) -> u32 {
        let value = self.0.resolve(field);
        match value.trunc().to_u32() {
            Some(years) => years,
            None => {
                tracing::warn!(field, input = %value, "year count out of range, using 0");
                0
            }
        }
    }
}
