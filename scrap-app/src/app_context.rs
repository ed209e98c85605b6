use crate::application::RequestQuote;
use crate::infrastructure::openrouter::DEFAULT_MODEL;
use crate::infrastructure::security::RateLimiter;
use scrap_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub request_quote: Arc<RequestQuote>,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new_openrouter(api_key: String, model: String) -> Result<Self, AppError> {
        Ok(Self {
            request_quote: Arc::new(RequestQuote::new_openrouter(api_key, model)?),
            rate_limiter: RateLimiter::new(),
        })
    }

    /// Reads `OPENROUTER_API_KEY` (required) and `OPENROUTER_MODEL` (optional).
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| AppError::Internal("OPENROUTER_API_KEY must be set".to_string()))?;
        let model = std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!("Using OpenRouter pricing backend with model {}", model);
        Self::new_openrouter(api_key, model)
    }
}
