use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::flows::payment::{CardDetails, PaymentFlow, PaymentMethod, PaymentStep};
use crate::models::plan::Plan;
use crate::models::recharge::RechargeRecord;
use crate::models::subscriber::SubscriberProfile;
use crate::state::AppState;

// Request DTOs
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub plan_id: i64,
    pub user_id: i64,

    #[validate(length(min = 1, message = "Name is required"))]
    pub user_name: String,

    #[validate(length(equal = 10, message = "Mobile number must be 10 digits"))]
    pub mobile_number: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectMethodRequest {
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetailsRequest {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

// Response DTOs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub step: PaymentStep,
    pub plan: Plan,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub success: bool,
    pub step: PaymentStep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub record: RechargeRecord,
    pub valid_until: String,
}

// 1. Open a recharge session for a plan
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>> {
    req.validate()?;

    let subscriber = SubscriberProfile {
        user_id: req.user_id,
        name: req.user_name,
        mobile_number: req.mobile_number,
    };

    let flow = PaymentFlow::start(
        state.ledger.clone(),
        state.notifier.clone(),
        subscriber,
        req.plan_id,
    )
    .await?;

    let plan = flow.plan().clone();
    let step = flow.step();
    let (session_id, _) = state.insert_payment(flow).await;

    Ok(Json(SessionResponse {
        success: true,
        session_id,
        step,
        plan,
    }))
}

// 2. Confirm the plan and move on to payment
pub async fn proceed_to_payment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StepResponse>> {
    let flow = state
        .payment(session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let mut flow = flow.lock().await;

    flow.proceed_to_payment()?;

    Ok(Json(StepResponse {
        success: true,
        step: flow.step(),
    }))
}

// 3. Pick a payment method
pub async fn select_method(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SelectMethodRequest>,
) -> Result<Json<StepResponse>> {
    let flow = state
        .payment(session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let mut flow = flow.lock().await;

    flow.select_method(req.method)?;

    Ok(Json(StepResponse {
        success: true,
        step: flow.step(),
    }))
}

// 4. Store card input on the session
pub async fn set_card_details(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CardDetailsRequest>,
) -> Result<Json<StepResponse>> {
    let flow = state
        .payment(session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let mut flow = flow.lock().await;

    flow.set_card_details(CardDetails {
        number: req.number,
        expiry: req.expiry,
        cvv: req.cvv,
        name_on_card: req.name_on_card,
    })?;

    Ok(Json(StepResponse {
        success: true,
        step: flow.step(),
    }))
}

// 5. Submit the payment
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SubmitResponse>> {
    let flow = state
        .payment(session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let mut flow = flow.lock().await;

    let now = Utc::now();
    let record = flow.submit(now).await?;
    let valid_until = flow.valid_until(now);

    Ok(Json(SubmitResponse {
        success: true,
        message: "Recharge successful!".to_string(),
        record,
        valid_until,
    }))
}
