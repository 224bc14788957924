use cosmwasm_std::Uint128;

use crate::types::{KycRequirement, Subscriber, Validity};

/// Cumulative KYC thresholds on the awarded amount. A winner at or above a
/// threshold owes every requirement at that threshold and below.
pub const KYC_PHONE_THRESHOLD: u128 = 50_000;
pub const KYC_ID_THRESHOLD: u128 = 500_000;
pub const KYC_BANK_THRESHOLD: u128 = 1_000_000;

/// The KYC set an award of `amount` demands, cheapest requirement first.
pub fn required_kyc(amount: Uint128) -> Vec<KycRequirement> {
    let mut required = Vec::new();
    if amount.u128() >= KYC_PHONE_THRESHOLD {
        required.push(KycRequirement::PhoneVerification);
    }
    if amount.u128() >= KYC_ID_THRESHOLD {
        required.push(KycRequirement::IdDocument);
    }
    if amount.u128() >= KYC_BANK_THRESHOLD {
        required.push(KycRequirement::BankAccount);
    }
    required
}

/// Result of validating one selected winner against an award amount.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationOutcome {
    pub validity: Validity,
    /// Requirements the award demands that the subscriber has not
    /// completed. Empty unless `validity` is `PendingKyc`.
    pub missing_kyc: Vec<KycRequirement>,
}

impl ValidationOutcome {
    fn terminal(validity: Validity) -> Self {
        ValidationOutcome {
            validity,
            missing_kyc: Vec::new(),
        }
    }
}

/// Validate a selected winner. Checks run in severity order: opt-in and
/// blacklist findings void the win outright, missing KYC only suspends
/// payout.
pub fn validate_winner(subscriber: &Subscriber, awarded: Uint128) -> ValidationOutcome {
    if !subscriber.opted_in {
        return ValidationOutcome::terminal(Validity::InvalidNotOptedIn);
    }
    if subscriber.blacklisted {
        return ValidationOutcome::terminal(Validity::InvalidBlacklisted);
    }
    let missing: Vec<KycRequirement> = required_kyc(awarded)
        .into_iter()
        .filter(|req| !subscriber.kyc_completed.contains(req))
        .collect();
    if !missing.is_empty() {
        return ValidationOutcome {
            validity: Validity::PendingKyc,
            missing_kyc: missing,
        };
    }
    ValidationOutcome::terminal(Validity::Valid)
}
