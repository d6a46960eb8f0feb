//! Interactive terminal flow: search, select, price, share, export.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use kit_core::PaymentMethod;
use kit_data::SearchError;
use tracing::warn;

use crate::config::AppConfig;
use crate::pdf::ProposalExporter;
use crate::report::render_report;
use crate::session::{QuoteSession, SessionError};
use crate::share::share_link;

pub struct Prompt<'a, R, W> {
    session: QuoteSession<'a>,
    config: &'a AppConfig,
    pdf_dir: PathBuf,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Prompt<'a, R, W> {
    pub fn new(
        session: QuoteSession<'a>,
        config: &'a AppConfig,
        pdf_dir: PathBuf,
        input: R,
        output: W,
    ) -> Self {
        Self {
            session,
            config,
            pdf_dir,
            input,
            output,
        }
    }

    /// Runs quotes until the user declines another one or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if !self.run_once()? {
                return Ok(());
            }
            match self.ask("Nova consulta? [s/N]: ")? {
                Some(answer) if is_yes(&answer) => continue,
                _ => return Ok(()),
            }
        }
    }

    /// One full quote. Returns `false` when input ended midway.
    fn run_once(&mut self) -> Result<bool> {
        if !self.search_step()? {
            return Ok(false);
        }
        if !self.select_step()? {
            return Ok(false);
        }

        let Some(name) = self.ask("Nome do cliente (opcional): ")? else {
            return Ok(false);
        };
        self.session.set_customer_name(&name);

        if !self.payment_step()? || !self.discount_step()? {
            return Ok(false);
        }

        let quote = self.session.quote()?;
        let link = share_link(&self.config.share.base_url, &quote.summary);
        writeln!(self.output)?;
        write!(self.output, "{}", render_report(&quote))?;
        writeln!(self.output, "📲 Enviar via WhatsApp: {link}")?;
        writeln!(self.output)?;

        let Some(answer) = self.ask("Baixar proposta em PDF? [s/N]: ")? else {
            return Ok(false);
        };
        if is_yes(&answer) {
            let exporter = ProposalExporter::new(&self.config.export);
            match exporter.write_to_dir(&self.pdf_dir, &quote.input, &quote.summary) {
                Ok(path) => writeln!(self.output, "📥 Proposta salva em {}", path.display())?,
                Err(err) => {
                    warn!(error = %err, "proposal export failed");
                    writeln!(self.output, "Não foi possível gerar a proposta: {err}")?;
                }
            }
        }
        Ok(true)
    }

    fn search_step(&mut self) -> Result<bool> {
        loop {
            let Some(term) = self.ask("🔍 Digite parte do nome do kit: ")? else {
                return Ok(false);
            };
            match self.session.search(&term) {
                Ok(matches) => {
                    let listing: Vec<String> = matches
                        .iter()
                        .enumerate()
                        .map(|(idx, desc)| format!("  {}) {desc}", idx + 1))
                        .collect();
                    for line in listing {
                        writeln!(self.output, "{line}")?;
                    }
                    return Ok(true);
                }
                Err(SessionError::Search(SearchError::EmptyTerm)) => {
                    writeln!(
                        self.output,
                        "Digite ao menos parte do nome do kit para começar."
                    )?;
                }
                Err(SessionError::Search(SearchError::NoMatches(_))) => {
                    writeln!(self.output, "Nenhum modelo encontrado com esse termo.")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn select_step(&mut self) -> Result<bool> {
        loop {
            let Some(answer) = self.ask("Selecione um kit [1]: ")? else {
                return Ok(false);
            };
            let index = if answer.is_empty() {
                1
            } else {
                match answer.parse::<usize>() {
                    Ok(index) => index,
                    Err(_) => {
                        writeln!(self.output, "Informe o número do kit.")?;
                        continue;
                    }
                }
            };
            match self.session.select_index(index) {
                Ok(_) => {
                    if let Some(item) = self.session.selected() {
                        writeln!(self.output, "📦 Kit selecionado: {}", item.description)?;
                    }
                    return Ok(true);
                }
                Err(err @ SessionError::SelectionOutOfRange { .. }) => {
                    writeln!(self.output, "{err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn payment_step(&mut self) -> Result<bool> {
        loop {
            let Some(answer) = self.ask(&payment_menu())? else {
                return Ok(false);
            };
            let method = if answer.is_empty() {
                Some(PaymentMethod::Cash)
            } else {
                PaymentMethod::parse(&answer)
            };
            match method {
                Some(method) => {
                    self.session.set_payment_method(method);
                    return Ok(true);
                }
                None => writeln!(self.output, "Escolha 1 ou 2.")?,
            }
        }
    }

    fn discount_step(&mut self) -> Result<bool> {
        loop {
            let max = self.session.max_discount();
            let question = format!("Desconto (%) - máx. {max}% [0]: ");
            let Some(answer) = self.ask(&question)? else {
                return Ok(false);
            };
            let percent = if answer.is_empty() {
                0
            } else {
                match answer.trim_end_matches('%').parse::<u32>() {
                    Ok(percent) => percent,
                    Err(_) => {
                        writeln!(self.output, "Informe um número inteiro entre 0 e {max}.")?;
                        continue;
                    }
                }
            };
            match self.session.set_discount(percent) {
                Ok(()) => return Ok(true),
                Err(err @ SessionError::DiscountOutOfRange { .. }) => {
                    writeln!(self.output, "{err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Prints `question` and reads one trimmed line; `None` at end of input.
    fn ask(
        &mut self,
        question: &str,
    ) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// One numbered entry per payment method, in menu order.
fn payment_menu() -> String {
    let options: Vec<String> = PaymentMethod::all()
        .iter()
        .enumerate()
        .map(|(idx, method)| format!("{}) {}", idx + 1, method.label()))
        .collect();
    format!("Forma de pagamento: {} [1]: ", options.join("  "))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}
