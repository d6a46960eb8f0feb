//! Quote calculations and the proposal text built from them.

pub mod common;
pub mod quote;
pub mod summary;

pub use common::format_currency;
pub use quote::QuoteEngine;
pub use summary::render_summary;
