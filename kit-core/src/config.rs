//! Pricing constants used by the quote engine.
//!
//! Values default to the current price list. A deployment for another
//! market overrides them through the `[pricing]` table of the CLI config.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("assembly_area_per_day must be greater than zero, got {0}")]
    NonPositiveAssemblyRate(Decimal),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("discount cap for {method} is {value}%, above 100%")]
    DiscountCapTooLarge { method: &'static str, value: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Shipping rate in currency per tonne.
    pub freight_rate_per_tonne: Decimal,
    /// Ready-home multiplier applied to A-frame kits.
    pub a_frame_multiplier: Decimal,
    /// Ready-home multiplier applied to every other kit.
    pub standard_multiplier: Decimal,
    pub max_cash_discount: u32,
    pub max_credit_discount: u32,
    /// Square meters a crew assembles per day.
    pub assembly_area_per_day: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            freight_rate_per_tonne: Decimal::from(1150),
            a_frame_multiplier: Decimal::new(200, 2),
            standard_multiplier: Decimal::new(215, 2),
            max_cash_discount: 12,
            max_credit_discount: 5,
            assembly_area_per_day: Decimal::from(12),
        }
    }
}

impl PricingConfig {
    /// Checks the values that would make the formulas meaningless.
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if self.assembly_area_per_day <= Decimal::ZERO {
            return Err(PricingConfigError::NonPositiveAssemblyRate(
                self.assembly_area_per_day,
            ));
        }

        for (field, value) in [
            ("freight_rate_per_tonne", self.freight_rate_per_tonne),
            ("a_frame_multiplier", self.a_frame_multiplier),
            ("standard_multiplier", self.standard_multiplier),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(PricingConfigError::Negative { field, value });
            }
        }

        for (method, value) in [
            ("cash", self.max_cash_discount),
            ("credit card", self.max_credit_discount),
        ] {
            if value > 100 {
                return Err(PricingConfigError::DiscountCapTooLarge { method, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_matches_current_price_list() {
        let config = PricingConfig::default();

        assert_eq!(config.freight_rate_per_tonne, dec!(1150));
        assert_eq!(config.a_frame_multiplier, dec!(2.00));
        assert_eq!(config.standard_multiplier, dec!(2.15));
        assert_eq!(config.max_cash_discount, 12);
        assert_eq!(config.max_credit_discount, 5);
        assert_eq!(config.assembly_area_per_day, dec!(12));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_assembly_rate() {
        let config = PricingConfig {
            assembly_area_per_day: dec!(0),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::NonPositiveAssemblyRate(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let config = PricingConfig {
            freight_rate_per_tonne: dec!(-1),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(PricingConfigError::Negative {
                field: "freight_rate_per_tonne",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_discount_cap_over_one_hundred() {
        let config = PricingConfig {
            max_credit_discount: 101,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(PricingConfigError::DiscountCapTooLarge { value: 101, .. })
        ));
    }
}
