use serde::{Deserialize, Serialize};

const DEFAULT_VALIDITY_DAYS: i64 = 30;

/// Immutable snapshot of a recharge plan as served by the ledger backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub validity: String, // descriptor, e.g. "28 days"
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub calls: Option<String>,
    #[serde(default)]
    pub sms: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl Plan {
    /// Leading integer of the validity descriptor ("28 days" -> 28),
    /// falling back to 30 when the descriptor is unparseable.
    pub fn validity_days(&self) -> i64 {
        self.validity
            .trim()
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .unwrap_or(DEFAULT_VALIDITY_DAYS)
    }

    pub fn benefits_text(&self) -> String {
        if self.benefits.is_empty() {
            "None".to_string()
        } else {
            self.benefits.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(validity: &str) -> Plan {
        Plan {
            id: 1,
            name: "Smart 299".to_string(),
            price: 299.0,
            validity: validity.to_string(),
            data: None,
            calls: None,
            sms: None,
            category: None,
            benefits: vec![],
            active: Some(true),
        }
    }

    #[test]
    fn validity_days_parses_leading_integer() {
        assert_eq!(plan("28 days").validity_days(), 28);
        assert_eq!(plan("84 days").validity_days(), 84);
    }

    #[test]
    fn validity_days_defaults_to_thirty() {
        assert_eq!(plan("unlimited").validity_days(), 30);
        assert_eq!(plan("").validity_days(), 30);
    }
}
