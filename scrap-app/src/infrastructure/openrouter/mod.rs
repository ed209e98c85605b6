mod client;
mod prompt;
mod types;

pub use client::{OpenRouterClient, DEFAULT_MODEL};
pub use prompt::build_quote_prompt;
pub use types::{parse_quote_estimate, QuoteEstimate};
