pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, MAX_SEARCH_RESULTS, SearchError};
pub use loader::{CatalogLoadError, CatalogLoader, CatalogRecord};
