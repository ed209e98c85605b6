use crate::domain::{PriceQuote, ScrapSubmission};
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::infrastructure::security::InputSanitizer;
use scrap_errors::AppError;

/// Prices a scrap submission through the external quoting service.
pub struct RequestQuote {
    client: OpenRouterClient,
}

impl RequestQuote {
    pub fn new_openrouter(api_key: String, model: String) -> Result<Self, AppError> {
        Ok(Self {
            client: OpenRouterClient::new(api_key, model)?,
        })
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub async fn execute(&self, submission: ScrapSubmission) -> Result<PriceQuote, AppError> {
        let submission = InputSanitizer::check_submission(&submission)?;
        let estimate = self.client.request_quote(&submission).await?;

        let quote = PriceQuote::new(
            submission.scrap_type,
            submission.quantity,
            estimate.price_per_kg,
            estimate.currency,
            estimate.summary,
        )?;
        tracing::info!(
            "Quoted {} kg of {} at {} {}/kg",
            quote.quantity_kg,
            quote.scrap_type,
            quote.price_per_kg,
            quote.currency
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScrapType;

    #[tokio::test]
    async fn test_invalid_submission_rejected_before_pricing() {
        let use_case =
            RequestQuote::new_openrouter("test-key".to_string(), "test-model".to_string())
                .unwrap();
        let result = use_case
            .execute(ScrapSubmission::new("", ScrapType::Paper, 1.0, ""))
            .await;
        assert!(matches!(result, Err(AppError::InvalidSubmission(_))));
    }
}
