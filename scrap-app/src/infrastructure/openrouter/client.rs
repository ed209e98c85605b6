use super::prompt::build_quote_prompt;
use super::types::{parse_quote_estimate, ChatCompletionRequest, ChatCompletionResponse, QuoteEstimate};
use crate::domain::ScrapSubmission;
use scrap_errors::AppError;
use std::time::Duration;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenRouterClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn request_quote(&self, submission: &ScrapSubmission) -> Result<QuoteEstimate, AppError> {
        let prompt = build_quote_prompt(submission);
        let request = ChatCompletionRequest::new(&self.model, prompt);

        let response = self
            .http_client
            .post(OPENROUTER_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://scrap-pricing.local")
            .header("X-Title", "Scrap Pricing")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter error: {} - {}", status, body);
            return Err(AppError::PricingFailed(format!("API error: {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(map_transport_error)?;

        let reply = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::PricingFailed("No response from AI".to_string()))?;

        parse_quote_estimate(reply).inspect_err(|e| {
            tracing::warn!("Unusable quote from model {}: {} (reply: {:?})", self.model, e, reply);
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::PricingFailed(e.to_string())
    }
}
