//! CSV loader for the kit price list.
//!
//! ## CSV Format
//!
//! The file is the price spreadsheet exported as CSV. Headers are matched by
//! name, so column order does not matter and extra columns are ignored.
//!
//! | Column      | Required | Type    | Notes |
//! |-------------|----------|---------|-------|
//! | `DESCRICAO` | yes      | string  | Kit name, used for search and selection |
//! | `A VISTA`   | yes      | decimal | Cash price, e.g. `48990.00` |
//! | `PESO UND`  | no       | decimal | Unit weight in kg; empty reads as 0 |
//! | `LINK_KIT`  | no       | string  | Link to the online model |
//! | `AREA`      | no       | decimal | Area in m²; empty disables the assembly estimate |
//!
//! Rows with an empty `DESCRICAO` are skipped, as they can never be found
//! by a search.
//!
//! ### Regional exports
//!
//! Spreadsheets saved with a pt-BR locale use `;` between cells and `,` as
//! the decimal mark. The delimiter is taken from the header line (`;` when it
//! has semicolons and no commas, `,` otherwise) and numeric cells accept
//! either mark:
//!
//! | Cell        | Value    |
//! |-------------|----------|
//! | `48990.00`  | 48990.00 |
//! | `48990,00`  | 48990.00 |
//! | `48.990,00` | 48990.00 |
//! | `48,990.00` | 48990.00 |
//!
//! When both marks appear, the last one is the decimal mark. A leading
//! UTF-8 byte order mark is ignored.
//!
//! ### Example
//!
//! ```csv
//! DESCRICAO,A VISTA,PESO UND,LINK_KIT,AREA
//! Kit A-Frame 32m²,48990.00,4200,https://example.com/a-frame-32,32
//! ```
//!
//! ```csv
//! DESCRICAO;A VISTA;PESO UND;LINK_KIT;AREA
//! Kit A-Frame 32m²;48.990,00;4200;https://example.com/a-frame-32;32
//! ```

use std::io::Read;
use std::path::Path;

use kit_core::CatalogItem;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The CSV is structurally invalid, a required column is missing, or a
    /// numeric cell could not be parsed.
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvParse(err.to_string())
    }
}

/// A single row of the price spreadsheet, mirroring its column names.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRecord {
    #[serde(rename = "DESCRICAO")]
    pub description: String,

    #[serde(rename = "A VISTA", deserialize_with = "deserialize_decimal")]
    pub cash_price: Decimal,

    #[serde(
        rename = "PESO UND",
        default,
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub unit_weight: Option<Decimal>,

    #[serde(
        rename = "LINK_KIT",
        default,
        deserialize_with = "deserialize_optional_string"
    )]
    pub link: Option<String>,

    #[serde(rename = "AREA", default, deserialize_with = "deserialize_optional_decimal")]
    pub area: Option<Decimal>,
}

impl From<CatalogRecord> for CatalogItem {
    fn from(record: CatalogRecord) -> Self {
        let mut item = CatalogItem::new(
            record.description,
            record.cash_price,
            record.unit_weight.unwrap_or_default(),
        );
        item.online_link = record.link;
        item.area = record.area;
        item
    }
}

/// Parses a numeric cell written with either `.` or `,` as the decimal mark.
fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    let s = raw.trim();
    let normalized = match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        _ => s.to_string(),
    };
    normalized.parse::<Decimal>()
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_decimal(&s).map_err(|e| serde::de::Error::custom(format!("invalid number '{s}': {e}")))
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_decimal(&s)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number '{s}': {e}"))),
        None => Ok(None),
    }
}

fn detect_delimiter(header: &str) -> u8 {
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for the kit catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse catalog rows from any CSV reader, in file order.
    pub fn parse<R: Read>(mut reader: R) -> Result<Vec<CatalogItem>, CatalogLoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| CatalogLoadError::CsvParse(e.to_string()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let delimiter = detect_delimiter(text.lines().next().unwrap_or_default());
        debug!(delimiter = %char::from(delimiter), "catalog delimiter");

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut items = Vec::new();
        for (idx, result) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
            let record = result?;
            if record.description.is_empty() {
                warn!(row = idx + 1, "skipping catalog row without description");
                continue;
            }
            items.push(CatalogItem::from(record));
        }

        debug!(count = items.len(), "parsed catalog rows");
        Ok(items)
    }

    /// Read a catalog file from disk and delegate to [`CatalogLoader::parse`].
    pub fn load_from_file(path: &Path) -> Result<Vec<CatalogItem>, CatalogLoadError> {
        let file = std::fs::File::open(path).map_err(|source| CatalogLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(file)
    }
}
