// flows/recovery.rs
//
// Forgot-password flow: mobile number in, OTP out by mail, password reset
// on a matching OTP. One live OTP per flow instance, ten minute deadline,
// three issuance attempts per rolling hour.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::errors::{AppError, Result};
use crate::models::subscriber::SubscriberContact;
use crate::rate_limit::RateLimitWindow;
use crate::services::{NotificationDispatcher, SubscriberLedger};
use crate::validators::{check_otp, is_valid_mobile, OtpCheck};

pub const OTP_VALIDITY_MINUTES: i64 = 10;

// Generate 6-digit OTP
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// A live OTP issued for one recovery attempt.
#[derive(Debug, Clone)]
struct RecoveryRequest {
    mobile_number: String,
    otp: String,
    contact: SubscriberContact,
    expires_at: DateTime<Utc>,
}

enum RecoveryState {
    AwaitingMobile,
    OtpIssued(RecoveryRequest),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    AwaitingMobile,
    OtpIssued,
    Completed,
}

pub struct OtpRecoveryFlow {
    ledger: Arc<dyn SubscriberLedger>,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
    window: RateLimitWindow,
    state: RecoveryState,
}

impl OtpRecoveryFlow {
    pub fn new(
        ledger: Arc<dyn SubscriberLedger>,
        notifier: Option<Arc<dyn NotificationDispatcher>>,
        now: DateTime<Utc>,
    ) -> Self {
        OtpRecoveryFlow {
            ledger,
            notifier,
            window: RateLimitWindow::new(now),
            state: RecoveryState::AwaitingMobile,
        }
    }

    pub fn step(&self) -> RecoveryStep {
        match self.state {
            RecoveryState::AwaitingMobile => RecoveryStep::AwaitingMobile,
            RecoveryState::OtpIssued(_) => RecoveryStep::OtpIssued,
            RecoveryState::Completed => RecoveryStep::Completed,
        }
    }

    /// Drop an issued OTP past its deadline. Returns true when the flow
    /// reset to the initial state. Evaluated at every point of use, so no
    /// background timer is needed for correctness.
    pub fn expire_if_stale(&mut self, now: DateTime<Utc>) -> bool {
        if let RecoveryState::OtpIssued(request) = &self.state {
            if now > request.expires_at {
                tracing::info!("OTP for mobile {} expired", request.mobile_number);
                self.state = RecoveryState::AwaitingMobile;
                return true;
            }
        }
        false
    }

    /// Issue a fresh OTP for the given mobile number and mail it to the
    /// subscriber's registered address. A new request always replaces any
    /// previous one; the mail is best-effort.
    pub async fn request_otp(&mut self, mobile_number: &str, now: DateTime<Utc>) -> Result<()> {
        if !is_valid_mobile(mobile_number) {
            return Err(AppError::validation("Mobile number must be exactly 10 digits"));
        }

        // An unknown number fails before the limiter so a typo does not
        // burn an attempt.
        let contact = self.ledger.get_contact(mobile_number).await?;

        self.window
            .try_consume(now)
            .map_err(|retry_after| AppError::RateLimited {
                retry_after_secs: retry_after.num_seconds(),
            })?;

        let otp = generate_otp();
        self.state = RecoveryState::OtpIssued(RecoveryRequest {
            mobile_number: mobile_number.to_string(),
            otp: otp.clone(),
            contact: contact.clone(),
            expires_at: now + Duration::minutes(OTP_VALIDITY_MINUTES),
        });

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.send_otp(&contact, &otp).await {
                tracing::warn!("Failed to send OTP email to {}: {}", contact.email, e);
            }
        }

        tracing::info!("OTP issued for mobile {}", mobile_number);
        Ok(())
    }

    /// Check the submitted OTP and, on a match, persist the new password
    /// through the ledger. A wrong OTP leaves the issued request intact; an
    /// expired one resets the flow. Ledger failure keeps the OTP live so
    /// the user can retry.
    pub async fn verify_and_reset(
        &mut self,
        otp: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        if self.expire_if_stale(now) {
            return Err(AppError::OtpExpired);
        }

        let request = match &self.state {
            RecoveryState::OtpIssued(request) => request,
            RecoveryState::AwaitingMobile => {
                return Err(AppError::flow_state("No OTP has been requested"))
            }
            RecoveryState::Completed => {
                return Err(AppError::flow_state("Password has already been reset"))
            }
        };

        match check_otp(otp, &request.otp, now, request.expires_at) {
            OtpCheck::Expired => {
                self.state = RecoveryState::AwaitingMobile;
                Err(AppError::OtpExpired)
            }
            OtpCheck::WrongOtp => Err(AppError::WrongOtp),
            OtpCheck::Valid => {
                let message = self
                    .ledger
                    .reset_password(&request.contact.email, new_password)
                    .await?;
                self.state = RecoveryState::Completed;
                Ok(message)
            }
        }
    }
}
