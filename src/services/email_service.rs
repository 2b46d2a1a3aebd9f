// services/email_service.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use crate::errors::{AppError, Result};
use crate::models::subscriber::SubscriberContact;
use crate::services::{NotificationDispatcher, RechargeReceipt};

const EMAIL_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: serde_json::Value,
}

/// Sends templated mail through the EmailJS REST relay.
#[derive(Clone)]
pub struct EmailService {
    service_id: String,
    public_key: String,
    otp_template: String,
    receipt_template: String,
    client: Client,
}

impl EmailService {
    pub fn new(
        service_id: String,
        public_key: String,
        otp_template: String,
        receipt_template: String,
    ) -> Self {
        Self {
            service_id,
            public_key,
            otp_template,
            receipt_template,
            client: Client::new(),
        }
    }

    async fn send(&self, template_id: &str, template_params: serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(EMAIL_SEND_URL)
            .json(&SendEmailRequest {
                service_id: &self.service_id,
                template_id,
                user_id: &self.public_key,
                template_params,
            })
            .send()
            .await
            .map_err(|e| AppError::Notification(format!("Email API error: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Notification(format!(
                "Email sending failed with status: {}",
                response.status()
            )))
        }
    }
}

#[async_trait]
impl NotificationDispatcher for EmailService {
    async fn send_otp(&self, contact: &SubscriberContact, otp: &str) -> Result<()> {
        let params = json!({
            "user_name": contact.user_name,
            "otp": otp,
            "to_email": contact.email,
        });

        self.send(&self.otp_template, params).await
    }

    async fn send_recharge_receipt(&self, receipt: &RechargeReceipt) -> Result<()> {
        let params = serde_json::to_value(receipt)
            .map_err(|e| AppError::Notification(format!("Receipt encoding failed: {}", e)))?;

        self.send(&self.receipt_template, params).await
    }
}
