mod quantity;
mod scrap_form;

pub use quantity::parse_quantity;
pub use scrap_form::{FormError, FormResult, ScrapForm, SubmitOutcome, SubmitState};
