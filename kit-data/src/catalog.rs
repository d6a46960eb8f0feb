use std::collections::HashSet;
use std::path::Path;

use kit_core::CatalogItem;
use thiserror::Error;
use tracing::{debug, warn};

use crate::loader::{CatalogLoadError, CatalogLoader};

/// Most rows a single search returns.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Outcomes of a search that leave nothing to select.
///
/// Neither is a fault: the caller shows a hint and waits for a new term.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("type at least part of the kit name to search")]
    EmptyTerm,

    #[error("no kit matches '{0}'")]
    NoMatches(String),
}

/// In-memory kit catalog, kept in spreadsheet order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.description.as_str()) {
                warn!(
                    kit = %item.description,
                    "duplicate description in catalog; lookups resolve to the first row"
                );
            }
        }
        Self { items }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let items = CatalogLoader::load_from_file(path)?;
        debug!(path = %path.display(), count = items.len(), "catalog loaded");
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring search over descriptions.
    ///
    /// The term is matched literally and returns at most
    /// [`MAX_SEARCH_RESULTS`] rows in catalog order.
    pub fn search(
        &self,
        term: &str,
    ) -> Result<Vec<&CatalogItem>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let needle = term.to_lowercase();
        let matches: Vec<_> = self
            .items
            .iter()
            .filter(|item| item.description.to_lowercase().contains(&needle))
            .take(MAX_SEARCH_RESULTS)
            .collect();

        if matches.is_empty() {
            return Err(SearchError::NoMatches(term.to_string()));
        }

        debug!(term, count = matches.len(), "catalog search");
        Ok(matches)
    }

    /// Exact lookup of the row a user picked from the search results.
    pub fn find_by_description(
        &self,
        description: &str,
    ) -> Option<&CatalogItem> {
        self.items
            .iter()
            .find(|item| item.description == description)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("Kit A-Frame 32m²", dec!(48990), dec!(4200)),
            CatalogItem::new("Pousada 40m²", dec!(35000), dec!(3800)),
            CatalogItem::new("Pousada A-Frame", dec!(10000), dec!(500)),
            CatalogItem::new("Chalé Família 60m²", dec!(72000), dec!(6100)),
        ])
    }

    fn descriptions(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.description.clone()).collect()
    }

    #[test]
    fn empty_catalog_reports_empty() {
        let empty = Catalog::new(Vec::new());

        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert!(!catalog().is_empty());
        assert_eq!(
            empty.search("pousada"),
            Err(SearchError::NoMatches("pousada".to_string()))
        );
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let catalog = catalog();

        let found = catalog.search("a-frame").expect("should match");

        assert_eq!(descriptions(&found), vec!["Kit A-Frame 32m²", "Pousada A-Frame"]);
    }

    #[test]
    fn search_matches_accented_text() {
        let catalog = catalog();

        let found = catalog.search("CHALÉ").expect("should match");

        assert_eq!(descriptions(&found), vec!["Chalé Família 60m²"]);
    }

    #[test]
    fn search_trims_term() {
        let catalog = catalog();

        assert_eq!(catalog.search("  pousada ").map(|f| f.len()), Ok(2));
    }

    #[test]
    fn search_blank_term_is_rejected() {
        let catalog = catalog();

        assert_eq!(catalog.search("   "), Err(SearchError::EmptyTerm));
    }

    #[test]
    fn search_without_matches() {
        let catalog = catalog();

        assert_eq!(
            catalog.search("iglu"),
            Err(SearchError::NoMatches("iglu".to_string()))
        );
    }

    #[test]
    fn search_treats_term_literally() {
        let catalog = catalog();

        assert!(catalog.search("Pousada.*").is_err());
    }

    #[test]
    fn search_caps_results() {
        let items = (1..=15)
            .map(|n| CatalogItem::new(format!("Kit Loft {n}"), dec!(1000), dec!(10)))
            .collect();
        let catalog = Catalog::new(items);

        let found = catalog.search("loft").expect("should match");

        assert_eq!(found.len(), MAX_SEARCH_RESULTS);
        assert_eq!(found[0].description, "Kit Loft 1");
        assert_eq!(found[9].description, "Kit Loft 10");
    }

    #[test]
    fn find_by_description_requires_exact_match() {
        let catalog = catalog();

        assert_eq!(
            catalog.find_by_description("Pousada 40m²").map(|i| i.cash_price),
            Some(dec!(35000))
        );
        assert!(catalog.find_by_description("pousada 40m²").is_none());
    }

    #[test]
    fn find_by_description_resolves_first_duplicate() {
        let catalog = Catalog::new(vec![
            CatalogItem::new("Kit Loft", dec!(1000), dec!(10)),
            CatalogItem::new("Kit Loft", dec!(2000), dec!(20)),
        ]);

        assert_eq!(
            catalog.find_by_description("Kit Loft").map(|i| i.cash_price),
            Some(dec!(1000))
        );
    }
}
