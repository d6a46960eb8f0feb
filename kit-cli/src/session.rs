//! Interaction state for one quoting session.
//!
//! The session remembers the last selected kit so it can tell a new
//! selection from a repeated one, and it enforces the discount cap of the
//! chosen payment method before anything reaches the engine.

use kit_core::{
    CatalogItem, PaymentMethod, PricingConfig, QuoteEngine, QuoteInput, QuoteResult,
    render_summary,
};
use kit_data::{Catalog, SearchError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("selection {index} is out of range (1-{available})")]
    SelectionOutOfRange { index: usize, available: usize },

    #[error("kit '{0}' is not in the catalog")]
    UnknownKit(String),

    #[error("discount of {percent}% exceeds the {max}% limit for {method}")]
    DiscountOutOfRange {
        percent: u32,
        max: u32,
        method: &'static str,
    },

    #[error("no kit selected")]
    NoSelection,
}

/// Whether a selection replaced the previously selected kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Changed,
    Unchanged,
}

/// A computed quote together with its proposal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub input: QuoteInput,
    pub result: QuoteResult,
    pub summary: String,
}

pub struct QuoteSession<'a> {
    catalog: &'a Catalog,
    pricing: &'a PricingConfig,
    matches: Vec<String>,
    selected: Option<CatalogItem>,
    customer_name: Option<String>,
    payment_method: PaymentMethod,
    discount_percent: u32,
}

impl<'a> QuoteSession<'a> {
    pub fn new(
        catalog: &'a Catalog,
        pricing: &'a PricingConfig,
    ) -> Self {
        Self {
            catalog,
            pricing,
            matches: Vec::new(),
            selected: None,
            customer_name: None,
            payment_method: PaymentMethod::default(),
            discount_percent: 0,
        }
    }

    /// Runs a catalog search and remembers the matching descriptions.
    ///
    /// A failed search clears the previous results but keeps the selection.
    pub fn search(
        &mut self,
        term: &str,
    ) -> Result<&[String], SessionError> {
        self.matches.clear();
        let found = self.catalog.search(term)?;
        self.matches = found.into_iter().map(|i| i.description.clone()).collect();
        Ok(&self.matches)
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Selects the `index`-th (1-based) result of the last search.
    pub fn select_index(
        &mut self,
        index: usize,
    ) -> Result<SelectionChange, SessionError> {
        let description = index
            .checked_sub(1)
            .and_then(|idx| self.matches.get(idx))
            .cloned()
            .ok_or(SessionError::SelectionOutOfRange {
                index,
                available: self.matches.len(),
            })?;
        self.select_description(&description)
    }

    /// Selects a kit by its exact description.
    ///
    /// Picking a different kit than last time starts over with no discount.
    pub fn select_description(
        &mut self,
        description: &str,
    ) -> Result<SelectionChange, SessionError> {
        let item = self
            .catalog
            .find_by_description(description)
            .ok_or_else(|| SessionError::UnknownKit(description.to_string()))?;

        let unchanged = self
            .selected
            .as_ref()
            .is_some_and(|prev| prev.description == item.description);
        if unchanged {
            return Ok(SelectionChange::Unchanged);
        }

        info!(kit = %item.description, "kit selected");
        self.selected = Some(item.clone());
        self.discount_percent = 0;
        Ok(SelectionChange::Changed)
    }

    pub fn selected(&self) -> Option<&CatalogItem> {
        self.selected.as_ref()
    }

    pub fn set_customer_name(
        &mut self,
        name: &str,
    ) {
        let name = name.trim();
        self.customer_name = (!name.is_empty()).then(|| name.to_string());
    }

    /// Switches payment method, lowering the discount to the new cap if needed.
    pub fn set_payment_method(
        &mut self,
        method: PaymentMethod,
    ) {
        self.payment_method = method;
        let max = self.max_discount();
        if self.discount_percent > max {
            debug!(from = self.discount_percent, to = max, "discount clamped");
            self.discount_percent = max;
        }
    }

    pub fn max_discount(&self) -> u32 {
        self.payment_method.max_discount(self.pricing)
    }

    pub fn discount_percent(&self) -> u32 {
        self.discount_percent
    }

    pub fn set_discount(
        &mut self,
        percent: u32,
    ) -> Result<(), SessionError> {
        let max = self.max_discount();
        if percent > max {
            return Err(SessionError::DiscountOutOfRange {
                percent,
                max,
                method: self.payment_method.label(),
            });
        }
        self.discount_percent = percent;
        Ok(())
    }

    /// Current state as engine input.
    pub fn input(&self) -> Result<QuoteInput, SessionError> {
        let item = self.selected.clone().ok_or(SessionError::NoSelection)?;
        Ok(QuoteInput {
            item,
            payment_method: self.payment_method,
            discount_percent: self.discount_percent,
            customer_name: self.customer_name.clone(),
        })
    }

    /// Recomputes the quote from the current state.
    pub fn quote(&self) -> Result<Quote, SessionError> {
        let input = self.input()?;
        let result = QuoteEngine::new(self.pricing).quote(&input);
        let summary = render_summary(&input, &result);
        Ok(Quote {
            input,
            result,
            summary,
        })
    }
}
