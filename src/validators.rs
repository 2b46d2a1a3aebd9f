// src/validators.rs
//
// Pure format checks shared by the recovery and payment flows. None of
// these touch the network or panic on malformed input.

use chrono::{DateTime, Utc};

/// Exactly 10 decimal digits.
pub fn is_valid_mobile(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Outcome of comparing a submitted OTP against the issued one.
///
/// Expiry and a wrong value are distinct so the caller can pick the right
/// recovery action (restart vs. retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    WrongOtp,
    Expired,
}

pub fn check_otp(
    candidate: &str,
    expected: &str,
    now: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> OtpCheck {
    if now > expires_at {
        return OtpCheck::Expired;
    }
    if candidate == expected {
        OtpCheck::Valid
    } else {
        OtpCheck::WrongOtp
    }
}

/// Four groups of 4 digits separated by single spaces ("1234 5678 9012 3456").
pub fn is_valid_card_number(s: &str) -> bool {
    let groups: Vec<&str> = s.split(' ').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| g.len() == 4 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// MM/YY with MM in 01..=12. Does not check that the date is in the future.
pub fn is_valid_expiry(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return false;
    }
    let (month, year) = (&s[..2], &s[3..]);
    if !month.bytes().all(|b| b.is_ascii_digit()) || !year.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

/// Exactly 3 digits.
pub fn is_valid_cvv(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}
