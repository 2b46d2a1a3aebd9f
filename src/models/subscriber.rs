use serde::{Deserialize, Serialize};

/// Recovery contact resolved from a mobile number by the ledger backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberContact {
    pub email: String,
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_user_name() -> String {
    "User".to_string()
}

/// The subscriber performing a recharge. Supplied by the caller per
/// session; the portal keeps no login state of its own.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberProfile {
    pub user_id: i64,
    pub name: String,
    pub mobile_number: String,
}
