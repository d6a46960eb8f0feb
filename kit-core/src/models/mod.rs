mod catalog_item;
mod house_style;
mod payment_method;
mod quote;

pub use catalog_item::CatalogItem;
pub use house_style::HouseStyle;
pub use payment_method::PaymentMethod;
pub use quote::{QuoteInput, QuoteResult};
