use scrap_errors::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: MessageContent,
}

#[derive(Debug, Deserialize)]
pub struct MessageContent {
    pub content: String,
}

impl ChatCompletionRequest {
    pub fn new(model: &str, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: 300,
            // Quotes should be repeatable for the same input.
            temperature: 0.2,
        }
    }
}

/// The JSON object the model is asked to reply with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteEstimate {
    pub price_per_kg: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub summary: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Pulls the first JSON object out of a model reply. Models often wrap the
/// object in prose or a fenced code block.
pub fn parse_quote_estimate(reply: &str) -> Result<QuoteEstimate, AppError> {
    let start = reply
        .find('{')
        .ok_or_else(|| AppError::InvalidQuote("no JSON object in reply".to_string()))?;
    let end = reply
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| AppError::InvalidQuote("unterminated JSON object".to_string()))?;

    let mut estimate: QuoteEstimate = serde_json::from_str(&reply[start..=end])
        .map_err(|e| AppError::InvalidQuote(e.to_string()))?;

    if !estimate.price_per_kg.is_finite() || estimate.price_per_kg < 0.0 {
        return Err(AppError::InvalidQuote(format!(
            "price_per_kg out of range: {}",
            estimate.price_per_kg
        )));
    }

    estimate.currency = estimate.currency.trim().to_uppercase();
    if estimate.currency.len() != 3 || !estimate.currency.chars().all(|c| c.is_ascii_alphabetic()) {
        estimate.currency = default_currency();
    }
    estimate.summary = estimate.summary.trim().chars().take(500).collect();

    Ok(estimate)
}
