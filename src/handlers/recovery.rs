use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::state::AppState;

// Request DTOs
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub session_id: Option<Uuid>,

    #[validate(length(equal = 10, message = "Mobile number must be 10 digits"))]
    pub mobile_number: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub session_id: Uuid,

    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

// Response DTOs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpResponse {
    pub success: bool,
    pub message: String,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub success: bool,
    pub message: String,
}

// 1. Request OTP for password recovery
//
// The OTP travels only on the mail channel; the response never carries it.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(req): Json<RequestOtpRequest>,
) -> Result<Json<RequestOtpResponse>> {
    req.validate()?;

    let now = Utc::now();
    let (session_id, flow) = state.recovery_session(req.session_id, now).await;
    let mut flow = flow.lock().await;

    flow.request_otp(&req.mobile_number, now).await?;

    Ok(Json(RequestOtpResponse {
        success: true,
        message: "OTP sent to your email!".to_string(),
        session_id,
    }))
}

// 2. Verify OTP and reset the password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>> {
    req.validate()?;

    let flow = state
        .recovery(req.session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let mut flow = flow.lock().await;

    let message = flow
        .verify_and_reset(&req.otp, &req.new_password, Utc::now())
        .await?;
    drop(flow);

    // completed flows are done for good; free the session
    state.remove_recovery(req.session_id).await;

    Ok(Json(ResetPasswordResponse {
        success: true,
        message,
    }))
}
