pub mod email_service;
pub mod ledger_service;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::Result;
use crate::models::plan::Plan;
use crate::models::recharge::{RechargeRecord, RechargeRequest};
use crate::models::subscriber::SubscriberContact;

/// Authoritative backend for subscribers, plans and recharge records.
#[async_trait]
pub trait SubscriberLedger: Send + Sync {
    async fn get_contact(&self, mobile_number: &str) -> Result<SubscriberContact>;

    async fn reset_password(&self, email: &str, new_password: &str) -> Result<String>;

    async fn get_plan(&self, plan_id: i64) -> Result<Plan>;

    async fn create_recharge(&self, request: &RechargeRequest) -> Result<RechargeRecord>;
}

/// Template parameters for the recharge confirmation message.
///
/// Field names match the mail template placeholders.
#[derive(Debug, Serialize, Clone)]
pub struct RechargeReceipt {
    pub user_name: String,
    pub mobile_number: String,
    pub plan_name: String,
    pub amount: f64,
    pub validity: String,
    pub validity_date: String,
    pub data: String,
    pub calls: String,
    pub sms: String,
    pub benefits: String,
    pub payment_method: String,
    pub date: String,
    pub email: String,
}

/// Best-effort message delivery. Callers log failures and move on; no flow
/// transition depends on the outcome.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_otp(&self, contact: &SubscriberContact, otp: &str) -> Result<()>;

    async fn send_recharge_receipt(&self, receipt: &RechargeReceipt) -> Result<()>;
}
