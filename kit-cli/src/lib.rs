pub mod config;
pub mod logging;
pub mod pdf;
pub mod prompt;
pub mod report;
pub mod session;
pub mod share;

pub use config::AppConfig;
pub use session::{Quote, QuoteSession, SelectionChange, SessionError};
