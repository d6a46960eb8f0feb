//! Proposal text shared by the messaging link and the PDF body.

use std::fmt::Write;

use crate::calculations::common::format_currency;
use crate::{QuoteInput, QuoteResult};

pub const CUSTOMER_PLACEHOLDER: &str = "Não informado";
pub const LINK_PLACEHOLDER: &str = "Não disponível";

/// Fixed paragraph about what the kit price covers.
pub const ASSEMBLY_DISCLAIMER: &str = "O kit é entregue desmontado e a mão de obra de montagem \
não está inclusa no valor. Oferecemos manual de montagem e suporte técnico à distância \
durante toda a obra. A estimativa de casa pronta é uma média de mercado e pode variar \
conforme a região, o acabamento e a fundação escolhidos.";

/// Renders the proposal as multi-line text.
///
/// Output depends only on the arguments, so repeated calls are byte-identical.
pub fn render_summary(
    input: &QuoteInput,
    result: &QuoteResult,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, input, result);
    out
}

fn write_summary(
    out: &mut String,
    input: &QuoteInput,
    result: &QuoteResult,
) -> std::fmt::Result {
    writeln!(
        out,
        "👤 Cliente: {}",
        input.customer().unwrap_or(CUSTOMER_PLACEHOLDER)
    )?;
    writeln!(out, "📦 Kit: {}", input.item.description)?;
    writeln!(out)?;
    writeln!(out, "💰 Valor à vista: {}", format_currency(result.cash_price))?;
    writeln!(
        out,
        "💲 Valor com {}% de desconto ({}): {}",
        input.discount_percent,
        input.payment_method.label(),
        format_currency(result.discounted_price)
    )?;
    writeln!(
        out,
        "🚚 Frete estimado: {} (pago direto à transportadora)",
        format_currency(result.freight_cost)
    )?;
    writeln!(
        out,
        "💵 Total com Frete: {}",
        format_currency(result.total_with_freight)
    )?;
    writeln!(
        out,
        "🏠 Estimativa casa pronta: {}",
        format_currency(result.ready_home_estimate)
    )?;
    writeln!(out)?;
    writeln!(out, "{ASSEMBLY_DISCLAIMER}")?;
    writeln!(out)?;
    write!(
        out,
        "🔗 Link do modelo: {}",
        input.item.online_link.as_deref().unwrap_or(LINK_PLACEHOLDER)
    )
}
