//! Terminal rendering of a computed quote.

use std::fmt::Write;

use kit_core::calculations::summary::{CUSTOMER_PLACEHOLDER, LINK_PLACEHOLDER};
use kit_core::format_currency;

use crate::session::Quote;

/// Result block shown after every computation.
///
/// Unlike the proposal summary it also lists the assembly estimate and
/// spells out how the total was reached.
pub fn render_report(quote: &Quote) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_report(&mut out, quote);
    out
}

fn write_report(
    out: &mut String,
    quote: &Quote,
) -> std::fmt::Result {
    let input = &quote.input;
    let result = &quote.result;

    writeln!(out, "── Resultado da Simulação ──")?;
    writeln!(
        out,
        "👤 Cliente: {}",
        input.customer().unwrap_or(CUSTOMER_PLACEHOLDER)
    )?;
    writeln!(out, "📦 Modelo Selecionado: {}", input.item.description)?;
    writeln!(out, "💰 Valor à Vista: {}", format_currency(result.cash_price))?;
    writeln!(
        out,
        "💲 Com Desconto ({}%, {}): {}",
        input.discount_percent,
        input.payment_method.label(),
        format_currency(result.discounted_price)
    )?;
    writeln!(
        out,
        "📐 Estimativa Média de Casa Pronta: {}",
        format_currency(result.ready_home_estimate)
    )?;
    writeln!(
        out,
        "🚚 Frete Estimado: {} (pago direto à transportadora)",
        format_currency(result.freight_cost)
    )?;
    writeln!(
        out,
        "💵 Valor Total com Frete: {} + {} = {}",
        format_currency(result.discounted_price),
        format_currency(result.freight_cost),
        format_currency(result.total_with_freight)
    )?;
    if let Some(days) = result.assembly_days {
        writeln!(out, "🕒 Estimativa montagem: {days} dias")?;
    }
    writeln!(
        out,
        "🔗 Ver modelo online: {}",
        input.item.online_link.as_deref().unwrap_or(LINK_PLACEHOLDER)
    )
}
