use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogItem, PaymentMethod};

/// Everything the engine needs to price one kit.
///
/// Built fresh on every interaction. `discount_percent` is trusted: the
/// session enforces the payment-method bound before it gets here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub item: CatalogItem,
    pub payment_method: PaymentMethod,
    pub discount_percent: u32,
    pub customer_name: Option<String>,
}

impl QuoteInput {
    /// Customer name with surrounding whitespace removed, `None` when blank.
    pub fn customer(&self) -> Option<&str> {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Derived monetary and time values for a [`QuoteInput`].
///
/// Amounts are kept at full precision; rounding happens when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub cash_price: Decimal,
    pub discounted_price: Decimal,
    pub freight_cost: Decimal,
    pub total_with_freight: Decimal,
    pub ready_home_estimate: Decimal,
    pub assembly_days: Option<u32>,
}
