use serde::{Deserialize, Serialize};

/// Payload sent to the ledger backend to create a recharge record.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    pub user_id: i64,
    pub user_name: String,
    pub mobile: String,
    pub plan_name: String,
    pub validity_days: i64,
    pub amount: f64,
    pub payment_method: String,
}

/// Recharge record as persisted and returned by the ledger backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub user_name: String,
    pub mobile: String,
    pub plan_name: String,
    pub amount: f64,
    #[serde(default)]
    pub validity_days: Option<i64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
