//! Quote calculations for a selected house kit.
//!
//! | Value               | Formula |
//! |---------------------|---------|
//! | Discounted price    | cash price × (1 − discount / 100) |
//! | Freight             | (unit weight kg / 1000) × rate per tonne |
//! | Total with freight  | discounted price + freight |
//! | Ready-home estimate | cash price × style multiplier (2.00 A-frame, 2.15 otherwise) |
//! | Assembly days       | round(area / 12), only when area > 0 |
//!
//! Freight is paid by the customer straight to the carrier, so it is never
//! discounted.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use kit_core::{CatalogItem, PaymentMethod, PricingConfig, QuoteEngine, QuoteInput};
//!
//! let config = PricingConfig::default();
//! let engine = QuoteEngine::new(&config);
//!
//! let input = QuoteInput {
//!     item: CatalogItem::new("Pousada A-Frame", dec!(10000), dec!(500)).with_area(dec!(24)),
//!     payment_method: PaymentMethod::Cash,
//!     discount_percent: 10,
//!     customer_name: None,
//! };
//!
//! let result = engine.quote(&input);
//!
//! assert_eq!(result.discounted_price, dec!(9000));
//! assert_eq!(result.freight_cost, dec!(575));
//! assert_eq!(result.total_with_freight, dec!(9575));
//! assert_eq!(result.ready_home_estimate, dec!(20000));
//! assert_eq!(result.assembly_days, Some(2));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{HouseStyle, PricingConfig, QuoteInput, QuoteResult};

const KILOGRAMS_PER_TONNE: Decimal = Decimal::ONE_THOUSAND;

/// Pure pricing engine parameterised by a [`PricingConfig`].
#[derive(Debug, Clone)]
pub struct QuoteEngine<'a> {
    config: &'a PricingConfig,
}

impl<'a> QuoteEngine<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Computes every derived value for `input`.
    pub fn quote(
        &self,
        input: &QuoteInput,
    ) -> QuoteResult {
        let item = &input.item;

        let discounted_price = self.apply_discount(item.cash_price, input.discount_percent);
        let freight_cost = self.compute_freight(item.unit_weight);
        let total_with_freight = discounted_price + freight_cost;
        let ready_home_estimate =
            self.compute_ready_home_estimate(item.cash_price, item.house_style);
        let assembly_days = self.compute_assembly_days(item.area.unwrap_or_default());

        debug!(
            kit = %item.description,
            discount = input.discount_percent,
            %discounted_price,
            %freight_cost,
            %total_with_freight,
            "quote computed"
        );

        QuoteResult {
            cash_price: item.cash_price,
            discounted_price,
            freight_cost,
            total_with_freight,
            ready_home_estimate,
            assembly_days,
        }
    }

    /// `price × (1 − percent / 100)`.
    ///
    /// The percentage is not checked against the payment-method cap.
    pub fn apply_discount(
        &self,
        price: Decimal,
        percent: u32,
    ) -> Decimal {
        price * (Decimal::ONE - Decimal::from(percent) / Decimal::ONE_HUNDRED)
    }

    /// Shipping cost for a kit weighing `unit_weight` kilograms.
    pub fn compute_freight(
        &self,
        unit_weight: Decimal,
    ) -> Decimal {
        unit_weight / KILOGRAMS_PER_TONNE * self.config.freight_rate_per_tonne
    }

    /// Average price of the finished house, built on top of the kit price.
    pub fn compute_ready_home_estimate(
        &self,
        cash_price: Decimal,
        style: HouseStyle,
    ) -> Decimal {
        let multiplier = match style {
            HouseStyle::AFrame => self.config.a_frame_multiplier,
            HouseStyle::Standard => self.config.standard_multiplier,
        };
        cash_price * multiplier
    }

    /// Estimated assembly time in whole days, `None` when the area is unknown.
    ///
    /// Halves round to the nearest even day.
    pub fn compute_assembly_days(
        &self,
        area: Decimal,
    ) -> Option<u32> {
        if area <= Decimal::ZERO {
            return None;
        }
        (area / self.config.assembly_area_per_day)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_u32()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{CatalogItem, PaymentMethod};

    fn engine_test<T>(f: impl FnOnce(QuoteEngine<'_>) -> T) -> T {
        let config = PricingConfig::default();
        f(QuoteEngine::new(&config))
    }

    fn pousada_a_frame() -> QuoteInput {
        QuoteInput {
            item: CatalogItem::new("Pousada A-Frame", dec!(10000), dec!(500)).with_area(dec!(24)),
            payment_method: PaymentMethod::Cash,
            discount_percent: 10,
            customer_name: None,
        }
    }

    // =========================================================================
    // apply_discount tests
    // =========================================================================

    #[test]
    fn apply_discount_zero_percent_keeps_price() {
        engine_test(|engine| {
            assert_eq!(engine.apply_discount(dec!(12345.67), 0), dec!(12345.67));
        });
    }

    #[test]
    fn apply_discount_never_increases_price() {
        engine_test(|engine| {
            let price = dec!(48990.00);
            for percent in 0..=12 {
                assert!(
                    engine.apply_discount(price, percent) <= price,
                    "discount of {percent}% raised the price"
                );
            }
        });
    }

    #[test]
    fn apply_discount_twelve_percent() {
        engine_test(|engine| {
            assert_eq!(engine.apply_discount(dec!(10000), 12), dec!(8800));
        });
    }

    // =========================================================================
    // compute_freight tests
    // =========================================================================

    #[test]
    fn compute_freight_one_tonne() {
        engine_test(|engine| {
            assert_eq!(engine.compute_freight(dec!(1000)), dec!(1150));
        });
    }

    #[test]
    fn compute_freight_zero_weight() {
        engine_test(|engine| {
            assert_eq!(engine.compute_freight(dec!(0)), dec!(0));
        });
    }

    #[test]
    fn compute_freight_uses_configured_rate() {
        let config = PricingConfig {
            freight_rate_per_tonne: dec!(900),
            ..Default::default()
        };
        let engine = QuoteEngine::new(&config);

        assert_eq!(engine.compute_freight(dec!(2500)), dec!(2250));
    }

    // =========================================================================
    // compute_ready_home_estimate tests
    // =========================================================================

    #[test]
    fn ready_home_estimate_a_frame_doubles_price() {
        engine_test(|engine| {
            let style = HouseStyle::classify("Kit A-Frame 32m²");
            assert_eq!(engine.compute_ready_home_estimate(dec!(100), style), dec!(200));
        });
    }

    #[test]
    fn ready_home_estimate_standard_uses_higher_multiplier() {
        engine_test(|engine| {
            let style = HouseStyle::classify("Pousada 40m²");
            assert_eq!(engine.compute_ready_home_estimate(dec!(100), style), dec!(215));
        });
    }

    // =========================================================================
    // compute_assembly_days tests
    // =========================================================================

    #[test]
    fn assembly_days_absent_without_area() {
        engine_test(|engine| {
            assert_eq!(engine.compute_assembly_days(dec!(0)), None);
            assert_eq!(engine.compute_assembly_days(dec!(-5)), None);
        });
    }

    #[test]
    fn assembly_days_exact_multiple() {
        engine_test(|engine| {
            assert_eq!(engine.compute_assembly_days(dec!(36)), Some(3));
        });
    }

    #[test]
    fn assembly_days_rounds_to_nearest_day() {
        engine_test(|engine| {
            assert_eq!(engine.compute_assembly_days(dec!(40)), Some(3)); // 3.33
            assert_eq!(engine.compute_assembly_days(dec!(44)), Some(4)); // 3.67
            assert_eq!(engine.compute_assembly_days(dec!(5)), Some(0)); // 0.42
        });
    }

    #[test]
    fn assembly_days_halves_round_to_even() {
        engine_test(|engine| {
            assert_eq!(engine.compute_assembly_days(dec!(30)), Some(2)); // 2.5
            assert_eq!(engine.compute_assembly_days(dec!(42)), Some(4)); // 3.5
        });
    }

    // =========================================================================
    // quote tests
    // =========================================================================

    #[test]
    fn quote_end_to_end_scenario() {
        engine_test(|engine| {
            let result = engine.quote(&pousada_a_frame());

            assert_eq!(
                result,
                QuoteResult {
                    cash_price: dec!(10000),
                    discounted_price: dec!(9000),
                    freight_cost: dec!(575),
                    total_with_freight: dec!(9575),
                    ready_home_estimate: dec!(20000),
                    assembly_days: Some(2),
                }
            );
        });
    }

    #[test]
    fn quote_missing_area_has_no_assembly_estimate() {
        engine_test(|engine| {
            let mut input = pousada_a_frame();
            input.item.area = None;

            assert_eq!(engine.quote(&input).assembly_days, None);
        });
    }

    #[test]
    fn quote_freight_is_not_discounted() {
        engine_test(|engine| {
            let mut input = pousada_a_frame();
            input.discount_percent = 0;
            let full = engine.quote(&input);
            input.discount_percent = 12;
            let discounted = engine.quote(&input);

            assert_eq!(full.freight_cost, discounted.freight_cost);
            assert_eq!(
                discounted.total_with_freight,
                discounted.discounted_price + discounted.freight_cost
            );
        });
    }
}
