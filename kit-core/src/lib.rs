pub mod calculations;
pub mod config;
pub mod models;

pub use calculations::{QuoteEngine, format_currency, render_summary};
pub use config::{PricingConfig, PricingConfigError};
pub use models::*;
