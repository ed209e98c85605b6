use super::ScrapType;
use scrap_errors::AppError;
use serde::{Deserialize, Serialize};

/// Result of a completed pricing request, handed to the form's success callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub scrap_type: ScrapType,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub total_price: f64,
    pub currency: String,
    pub summary: String,
}

impl PriceQuote {
    /// Builds a quote whose total is `price_per_kg * quantity_kg`. A total that
    /// overflows cannot be sent as JSON, so it is rejected as an unusable quote.
    pub fn new(
        scrap_type: ScrapType,
        quantity_kg: f64,
        price_per_kg: f64,
        currency: String,
        summary: String,
    ) -> Result<Self, AppError> {
        let total_price = price_per_kg * quantity_kg;
        if !total_price.is_finite() {
            return Err(AppError::InvalidQuote(format!(
                "total for {quantity_kg} kg at {price_per_kg} per kg is out of range"
            )));
        }
        Ok(Self {
            scrap_type,
            quantity_kg,
            price_per_kg,
            total_price,
            currency,
            summary,
        })
    }

    pub fn formatted_total(&self) -> String {
        format!("{:.2} {}", self.total_price, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_rate_times_quantity() {
        let quote = PriceQuote::new(
            ScrapType::Metal,
            12.5,
            0.8,
            "USD".to_string(),
            String::new(),
        )
        .unwrap();
        assert!((quote.total_price - 10.0).abs() < f64::EPSILON);
        assert_eq!(quote.formatted_total(), "10.00 USD");
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let err = PriceQuote::new(
            ScrapType::Metal,
            1e308,
            2.0,
            "USD".to_string(),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidQuote(_)));
    }

    #[test]
    fn test_quote_survives_json() {
        let quote = PriceQuote::new(
            ScrapType::Paper,
            1_000_000.0,
            1_000.0,
            "EUR".to_string(),
            "Bulk cardboard".to_string(),
        )
        .unwrap();
        let json = serde_json::to_string(&quote).unwrap();
        let back: PriceQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
