// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid OTP")]
    WrongOtp,

    #[error("OTP has expired. Please request a new one.")]
    OtpExpired,

    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: i64 },

    #[error("No account found for mobile number {0}")]
    MobileNotFound(String),

    #[error("Plan {0} not found")]
    PlanNotFound(i64),

    #[error("Unknown or expired session")]
    SessionNotFound,

    #[error("Invalid flow state: {0}")]
    FlowState(String),

    #[error("Recharge already submitted for this session")]
    DuplicateSubmission,

    #[error("Ledger error: {0}")]
    Upstream(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for AppError {

    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AppError::WrongOtp => (StatusCode::BAD_REQUEST, "Invalid OTP".to_string()),
            AppError::OtpExpired => (StatusCode::GONE, "OTP expired".to_string()),
            AppError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded".to_string()),
            AppError::MobileNotFound(_) => (StatusCode::NOT_FOUND, "Mobile number not found".to_string()),
            AppError::PlanNotFound(_) => (StatusCode::NOT_FOUND, "Plan not found".to_string()),
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Session not found".to_string()),
            AppError::FlowState(_) => (StatusCode::CONFLICT, "Invalid flow state".to_string()),
            AppError::DuplicateSubmission => (StatusCode::CONFLICT, "Duplicate submission".to_string()),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, "Ledger error".to_string()),
            AppError::Notification(_) => (StatusCode::BAD_GATEWAY, "Notification error".to_string()),
            AppError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string()),
        };

        let mut body = json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let AppError::RateLimited { retry_after_secs } = &self {
            body["retryAfterSecs"] = json!(retry_after_secs);
        }

        (status, Json(body)).into_response()
    }
}

// Manual From implementations
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn flow_state(msg: impl Into<String>) -> Self {
        AppError::FlowState(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    pub fn notification(msg: impl Into<String>) -> Self {
        AppError::Notification(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
