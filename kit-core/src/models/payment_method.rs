use serde::{Deserialize, Serialize};

use crate::PricingConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
}

impl PaymentMethod {
    /// Every method, in the order the payment menu numbers them.
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Cash, PaymentMethod::CreditCard]
    }

    /// Label shown to the customer in the proposal text.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "À Vista",
            PaymentMethod::CreditCard => "Cartão de Crédito",
        }
    }

    /// Largest discount percentage the seller may grant for this method.
    pub fn max_discount(
        &self,
        config: &PricingConfig,
    ) -> u32 {
        match self {
            PaymentMethod::Cash => config.max_cash_discount,
            PaymentMethod::CreditCard => config.max_credit_discount,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" | "avista" | "a-vista" | "1" => Some(Self::Cash),
            "credit" | "credit-card" | "cartao" | "2" => Some(Self::CreditCard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn max_discount_follows_payment_method() {
        let config = PricingConfig::default();

        assert_eq!(PaymentMethod::Cash.max_discount(&config), 12);
        assert_eq!(PaymentMethod::CreditCard.max_discount(&config), 5);
    }

    #[test]
    fn parse_accepts_cli_and_menu_values() {
        assert_eq!(PaymentMethod::parse("cash"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse(" Credit "), Some(PaymentMethod::CreditCard));
        assert_eq!(PaymentMethod::parse("2"), Some(PaymentMethod::CreditCard));
        assert_eq!(PaymentMethod::parse("pix"), None);
    }
}
