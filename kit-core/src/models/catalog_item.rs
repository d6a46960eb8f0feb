use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::HouseStyle;

/// A single kit row from the pricing catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name; also the search and selection key.
    pub description: String,
    pub cash_price: Decimal,
    /// Unit weight in kilograms.
    pub unit_weight: Decimal,
    pub online_link: Option<String>,
    /// Built area in square meters.
    pub area: Option<Decimal>,
    pub house_style: HouseStyle,
}

impl CatalogItem {
    /// Builds an item and classifies its style from the description.
    pub fn new(
        description: impl Into<String>,
        cash_price: Decimal,
        unit_weight: Decimal,
    ) -> Self {
        let description = description.into();
        let house_style = HouseStyle::classify(&description);
        Self {
            description,
            cash_price,
            unit_weight,
            online_link: None,
            area: None,
            house_style,
        }
    }

    pub fn with_link(
        mut self,
        link: impl Into<String>,
    ) -> Self {
        self.online_link = Some(link.into());
        self
    }

    pub fn with_area(
        mut self,
        area: Decimal,
    ) -> Self {
        self.area = Some(area);
        self
    }
}
