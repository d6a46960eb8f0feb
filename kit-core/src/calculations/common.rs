//! Rounding and currency formatting shared by the engine and its consumers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol printed in front of every amount.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use kit_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Brazilian reais: `.` groups thousands, `,` separates
/// cents, and the value is rounded half-up to two places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use kit_core::format_currency;
///
/// assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
/// assert_eq!(format_currency(dec!(0)), "R$ 0,00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_half_up(amount.abs());
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (int_part, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!(
        "{CURRENCY_SYMBOL} {sign}{},{cents}",
        group_thousands(int_part)
    )
}

/// Inserts `.` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands_with_dot() {
        assert_eq!(format_currency(dec!(1234.5)), "R$ 1.234,50");
    }

    #[test]
    fn format_currency_zero() {
        assert_eq!(format_currency(dec!(0)), "R$ 0,00");
    }

    #[test]
    fn format_currency_below_one_thousand_has_no_separator() {
        assert_eq!(format_currency(dec!(999.99)), "R$ 999,99");
        assert_eq!(format_currency(dec!(7)), "R$ 7,00");
    }

    #[test]
    fn format_currency_millions() {
        assert_eq!(format_currency(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_currency(dec!(100000)), "R$ 100.000,00");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(0.005)), "R$ 0,01");
        assert_eq!(format_currency(dec!(10.125)), "R$ 10,13");
        assert_eq!(format_currency(dec!(10.124)), "R$ 10,12");
    }

    #[test]
    fn format_currency_rounding_carries_into_thousands() {
        assert_eq!(format_currency(dec!(999.995)), "R$ 1.000,00");
    }

    #[test]
    fn format_currency_negative_keeps_symbol_first() {
        assert_eq!(format_currency(dec!(-1500)), "R$ -1.500,00");
    }

    #[test]
    fn group_thousands_boundaries() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("123456"), "123.456");
    }
}
