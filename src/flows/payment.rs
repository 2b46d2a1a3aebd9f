// flows/payment.rs
//
// Recharge purchase flow: confirm the plan, pick a payment method, submit.
// The Submitting step doubles as the guard against a second recharge being
// persisted for the same session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};
use crate::models::plan::Plan;
use crate::models::recharge::{RechargeRecord, RechargeRequest};
use crate::models::subscriber::SubscriberProfile;
use crate::services::{NotificationDispatcher, RechargeReceipt, SubscriberLedger};
use crate::validators::{is_valid_card_number, is_valid_cvv, is_valid_expiry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Netbanking,
    Upi,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Netbanking => "netbanking",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStep {
    Confirm,
    Payment,
    Submitting,
    Success,
}

/// "05 Jun 2025"-style display date.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

pub struct PaymentFlow {
    ledger: Arc<dyn SubscriberLedger>,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
    subscriber: SubscriberProfile,
    plan: Plan,
    method: PaymentMethod,
    card: Option<CardDetails>,
    step: PaymentStep,
    record: Option<RechargeRecord>,
}

impl std::fmt::Debug for PaymentFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentFlow")
            .field("subscriber", &self.subscriber)
            .field("plan", &self.plan)
            .field("method", &self.method)
            .field("card", &self.card)
            .field("step", &self.step)
            .field("record", &self.record)
            .field("has_notifier", &self.notifier.is_some())
            .finish()
    }
}

impl PaymentFlow {
    /// Fetch the plan snapshot and open a session on the confirmation step.
    pub async fn start(
        ledger: Arc<dyn SubscriberLedger>,
        notifier: Option<Arc<dyn NotificationDispatcher>>,
        subscriber: SubscriberProfile,
        plan_id: i64,
    ) -> Result<Self> {
        let plan = ledger.get_plan(plan_id).await?;

        Ok(PaymentFlow {
            ledger,
            notifier,
            subscriber,
            plan,
            method: PaymentMethod::Card,
            card: None,
            step: PaymentStep::Confirm,
            record: None,
        })
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn card_details(&self) -> Option<&CardDetails> {
        self.card.as_ref()
    }

    pub fn record(&self) -> Option<&RechargeRecord> {
        self.record.as_ref()
    }

    /// End of the plan's validity when recharged now.
    pub fn valid_until(&self, now: DateTime<Utc>) -> String {
        format_display_date(now + Duration::days(self.plan.validity_days()))
    }

    pub fn proceed_to_payment(&mut self) -> Result<()> {
        match self.step {
            PaymentStep::Confirm => {
                self.step = PaymentStep::Payment;
                Ok(())
            }
            _ => Err(AppError::flow_state("Session is past the confirmation step")),
        }
    }

    /// Pick a payment method. Stale card input does not survive a switch
    /// away from card; switching back starts blank.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<()> {
        if self.step != PaymentStep::Payment {
            return Err(AppError::flow_state(
                "Payment method can only change on the payment step",
            ));
        }
        if method != PaymentMethod::Card {
            self.card = None;
        }
        self.method = method;
        Ok(())
    }

    /// Store card input on the session. Not validated until submit.
    pub fn set_card_details(&mut self, card: CardDetails) -> Result<()> {
        if self.step != PaymentStep::Payment {
            return Err(AppError::flow_state(
                "Card details can only change on the payment step",
            ));
        }
        if self.method != PaymentMethod::Card {
            return Err(AppError::flow_state(
                "Card details require the card payment method",
            ));
        }
        self.card = Some(card);
        Ok(())
    }

    fn validate_card(&self) -> Result<()> {
        let card = self
            .card
            .as_ref()
            .ok_or_else(|| AppError::validation("Card details are required"))?;

        if !is_valid_card_number(&card.number) {
            return Err(AppError::validation("Invalid card number (16 digits required)"));
        }
        if !is_valid_expiry(&card.expiry) {
            return Err(AppError::validation("Invalid expiry date (MM/YY)"));
        }
        if !is_valid_cvv(&card.cvv) {
            return Err(AppError::validation("Invalid CVV (3 digits required)"));
        }
        if card.name_on_card.trim().is_empty() {
            return Err(AppError::validation("Name on card is required"));
        }
        Ok(())
    }

    /// Persist the recharge through the ledger and mail a confirmation.
    ///
    /// Card fields are validated before any network call. The step moves to
    /// Submitting before the ledger call so a resubmission cannot create a
    /// second record; ledger failure drops back to Payment with all entered
    /// details intact. The confirmation mail is best-effort and never rolls
    /// back a recorded recharge.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> Result<RechargeRecord> {
        match self.step {
            PaymentStep::Payment => {}
            PaymentStep::Submitting | PaymentStep::Success => {
                return Err(AppError::DuplicateSubmission)
            }
            PaymentStep::Confirm => {
                return Err(AppError::flow_state("Confirm the plan before paying"))
            }
        }

        if self.method == PaymentMethod::Card {
            self.validate_card()?;
        }

        self.step = PaymentStep::Submitting;

        let request = RechargeRequest {
            user_id: self.subscriber.user_id,
            user_name: self.subscriber.name.clone(),
            mobile: self.subscriber.mobile_number.clone(),
            plan_name: self.plan.name.clone(),
            validity_days: self.plan.validity_days(),
            amount: self.plan.price,
            payment_method: self.method.as_str().to_string(),
        };

        let record = match self.ledger.create_recharge(&request).await {
            Ok(record) => record,
            Err(e) => {
                self.step = PaymentStep::Payment;
                return Err(e);
            }
        };

        if let Err(e) = self.send_confirmation(&record, now).await {
            tracing::warn!(
                "Failed to send recharge confirmation for {}: {}",
                self.subscriber.mobile_number,
                e
            );
        }

        self.step = PaymentStep::Success;
        self.record = Some(record.clone());
        tracing::info!(
            "Recharge recorded for {} ({})",
            self.subscriber.mobile_number,
            self.plan.name
        );
        Ok(record)
    }

    async fn send_confirmation(&self, record: &RechargeRecord, now: DateTime<Utc>) -> Result<()> {
        let Some(notifier) = &self.notifier else {
            return Ok(());
        };

        let contact = self.ledger.get_contact(&self.subscriber.mobile_number).await?;

        let receipt = RechargeReceipt {
            user_name: if self.subscriber.name.is_empty() {
                "User".to_string()
            } else {
                self.subscriber.name.clone()
            },
            mobile_number: self.subscriber.mobile_number.clone(),
            plan_name: self.plan.name.clone(),
            amount: record.amount,
            validity: self.plan.validity.clone(),
            validity_date: self.valid_until(now),
            data: self.plan.data.clone().unwrap_or_else(|| "N/A".to_string()),
            calls: self.plan.calls.clone().unwrap_or_else(|| "N/A".to_string()),
            sms: self.plan.sms.clone().unwrap_or_else(|| "N/A".to_string()),
            benefits: self.plan.benefits_text(),
            payment_method: self.method.as_str().to_uppercase(),
            date: format_display_date(now),
            email: contact.email,
        };

        notifier.send_recharge_receipt(&receipt).await
    }
}
