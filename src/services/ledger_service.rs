// services/ledger_service.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AppError, Result};
use crate::models::plan::Plan;
use crate::models::recharge::{RechargeRecord, RechargeRequest};
use crate::models::subscriber::SubscriberContact;
use crate::services::SubscriberLedger;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetEmailRequest<'a> {
    mobile_number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    email: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// REST client for the subscriber ledger backend.
#[derive(Debug, Clone)]
pub struct LedgerService {
    base_url: String,
    client: Client,
}

impl LedgerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        LedgerService {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Pull the backend's {message} out of an error body, if there is one.
    async fn error_message(response: reqwest::Response, fallback: &str) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { message: Some(message) }) if !message.is_empty() => message,
            _ => format!("{} (status {})", fallback, status),
        }
    }
}

#[async_trait]
impl SubscriberLedger for LedgerService {
    async fn get_contact(&self, mobile_number: &str) -> Result<SubscriberContact> {
        let response = self
            .client
            .post(self.url("/auth/forgot-password/get-email"))
            .json(&GetEmailRequest { mobile_number })
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::MobileNotFound(mobile_number.to_string()));
        }
        if !response.status().is_success() {
            return Err(AppError::Upstream(
                Self::error_message(response, "Failed to fetch email").await,
            ));
        }

        Ok(response.json().await?)
    }

    async fn reset_password(&self, email: &str, new_password: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/auth/forgot-password"))
            .json(&ResetPasswordRequest { email, new_password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(
                Self::error_message(response, "Failed to reset password").await,
            ));
        }

        // The backend answers with a plain-text confirmation message.
        Ok(response.text().await?)
    }

    async fn get_plan(&self, plan_id: i64) -> Result<Plan> {
        let response = self
            .client
            .get(self.url(&format!("/plans/{}", plan_id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::PlanNotFound(plan_id));
        }
        if !response.status().is_success() {
            return Err(AppError::Upstream(
                Self::error_message(response, "Failed to fetch plan").await,
            ));
        }

        Ok(response.json().await?)
    }

    async fn create_recharge(&self, request: &RechargeRequest) -> Result<RechargeRecord> {
        let response = self
            .client
            .post(self.url("/recharge"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(
                Self::error_message(response, "Recharge failed").await,
            ));
        }

        Ok(response.json().await?)
    }
}
