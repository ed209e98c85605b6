mod price_quote;
mod scrap_type;
mod submission;

pub use price_quote::PriceQuote;
pub use scrap_type::{ScrapType, UnknownScrapType};
pub use submission::{
    FieldError, ScrapField, ScrapSubmission, MAX_LOCATION_LEN, MAX_QUANTITY_KG,
    MAX_SELLER_NAME_LEN,
};
