use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Pricing service failed: {0}")]
    PricingFailed(String),

    #[error("Pricing service returned an unusable quote: {0}")]
    InvalidQuote(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidSubmission(_) => "Some scrap details are invalid. Please check the form.",
            Self::PricingFailed(_) => "The pricing service is busy. Please try again later.",
            Self::InvalidQuote(_) => "We could not price this scrap right now. Please try again.",
            Self::RateLimited(msg) => msg,
            Self::Timeout => "The pricing request took too long. Please try again.",
            Self::Internal(_) => "Something went wrong on our side. Please try again later.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
                AppError::PricingFailed(_) | AppError::InvalidQuote(_) => StatusCode::BAD_GATEWAY,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = self.user_message().to_string();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}
