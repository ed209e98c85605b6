mod error_display;
mod loading_spinner;
mod quote_display;
mod scrap_form;

pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use quote_display::QuoteDisplay;
pub use scrap_form::ScrapForm;
