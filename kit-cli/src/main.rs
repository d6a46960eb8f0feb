use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kit_core::PaymentMethod;
use kit_data::{Catalog, SearchError};
use serde::Serialize;
use tracing::{debug, info, warn};

use kit_cli::config::AppConfig;
use kit_cli::logging;
use kit_cli::pdf::ProposalExporter;
use kit_cli::prompt::Prompt;
use kit_cli::report::render_report;
use kit_cli::session::{Quote, QuoteSession, SessionError};
use kit_cli::share::share_link;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Quote calculator for prefabricated house kits.
///
/// Without `--search` or `--kit` it starts an interactive session.
#[derive(Debug, Parser)]
#[command(name = "kit-quote", version, about, long_about = None)]
struct Cli {
    /// Price list exported from the spreadsheet as CSV.
    #[arg(short, long)]
    catalog: PathBuf,

    /// TOML file overriding pricing, share and export settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Part of the kit name to search for (one-shot mode).
    #[arg(short, long)]
    search: Option<String>,

    /// Which search result to quote, starting at 1.
    #[arg(long, default_value_t = 1)]
    select: usize,

    /// Exact kit description to quote, skipping the search (one-shot mode).
    #[arg(long, conflicts_with = "search")]
    kit: Option<String>,

    /// Customer name printed on the proposal.
    #[arg(long)]
    customer: Option<String>,

    #[arg(long, value_enum, default_value_t = PaymentArg::Cash)]
    payment: PaymentArg,

    /// Discount percentage, capped by the payment method.
    #[arg(long, default_value_t = 0)]
    discount: u32,

    /// Directory to write the PDF proposal into.
    /// In interactive mode this is where accepted proposals are saved.
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Print the quote as JSON instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log filter, e.g. `info` or `kit_cli=debug`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaymentArg {
    Cash,
    Credit,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cash => PaymentMethod::Cash,
            PaymentArg::Credit => PaymentMethod::CreditCard,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    quote: &'a Quote,
    share_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    proposal: Option<PathBuf>,
}

// ─── modes ───────────────────────────────────────────────────────────────────

fn run_one_shot(
    cli: &Cli,
    catalog: &Catalog,
    config: &AppConfig,
) -> Result<()> {
    let mut session = QuoteSession::new(catalog, &config.pricing);

    if let Some(kit) = &cli.kit {
        session.select_description(kit)?;
    } else if let Some(term) = &cli.search {
        match session.search(term) {
            Ok(_) => {}
            Err(SessionError::Search(SearchError::EmptyTerm)) => {
                println!("Digite ao menos parte do nome do kit para começar.");
                return Ok(());
            }
            Err(SessionError::Search(SearchError::NoMatches(term))) => {
                warn!(%term, "no kit matched the search");
                println!("Nenhum modelo encontrado com esse termo.");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
        session.select_index(cli.select)?;
    }

    session.set_customer_name(cli.customer.as_deref().unwrap_or_default());
    session.set_payment_method(cli.payment.into());
    session.set_discount(cli.discount)?;

    let quote = session.quote()?;
    let link = share_link(&config.share.base_url, &quote.summary);

    let proposal = match &cli.pdf {
        Some(dir) => {
            let exporter = ProposalExporter::new(&config.export);
            let path = exporter
                .write_to_dir(dir, &quote.input, &quote.summary)
                .with_context(|| format!("Failed to write proposal into: {}", dir.display()))?;
            Some(path)
        }
        None => None,
    };

    if cli.json {
        let report = JsonReport {
            quote: &quote,
            share_link: link,
            proposal,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&quote));
        println!("📲 Enviar via WhatsApp: {link}");
        if let Some(path) = proposal {
            println!("📥 Proposta salva em {}", path.display());
        }
    }

    Ok(())
}

fn run_interactive(
    cli: &Cli,
    catalog: &Catalog,
    config: &AppConfig,
) -> Result<()> {
    println!("Consulte valores, descontos, frete e link do kit em segundos!");

    let session = QuoteSession::new(catalog, &config.pricing);
    let pdf_dir = cli.pdf.clone().unwrap_or_else(|| PathBuf::from("."));
    let stdin = io::stdin();
    let mut prompt = Prompt::new(session, config, pdf_dir, stdin.lock(), io::stdout());
    prompt.run()
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level).with_context(|| format!("Invalid --log-level: {level}"))?;
    }
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };
    debug!(?config, "configuration");

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("Failed to load catalog: {}", cli.catalog.display()))?;
    if catalog.is_empty() {
        warn!(path = %cli.catalog.display(), "catalog has no kits, every search will come up empty");
    } else {
        info!(count = catalog.len(), "catalog ready");
    }

    let outcome = if cli.search.is_some() || cli.kit.is_some() {
        run_one_shot(&cli, &catalog, &config)
    } else {
        run_interactive(&cli, &catalog, &config)
    };

    logging::disable_file_logging();
    outcome
}
