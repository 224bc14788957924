use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// The draw category: the daily weekday draw (Monday through Friday) or
/// the bigger Saturday draw. Sunday holds no draw.
#[cw_serde]
pub enum DrawCategory {
    Weekday,
    Saturday,
}

impl DrawCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawCategory::Weekday => "weekday",
            DrawCategory::Saturday => "saturday",
        }
    }

    /// The category a draw on `weekday` belongs to. None for Sunday.
    pub fn for_weekday(weekday: &Weekday) -> Option<DrawCategory> {
        match weekday {
            Weekday::Sunday => None,
            Weekday::Saturday => Some(DrawCategory::Saturday),
            _ => Some(DrawCategory::Weekday),
        }
    }
}

#[cw_serde]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Weekday of a UTC timestamp. The unix epoch (day 0) was a Thursday.
    pub fn from_timestamp(ts: Timestamp) -> Weekday {
        Weekday::from_unix_day(unix_day(ts))
    }

    pub fn from_unix_day(day: u64) -> Weekday {
        match (day + 3) % 7 {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// Whole days since the unix epoch, UTC.
pub fn unix_day(ts: Timestamp) -> u64 {
    ts.seconds() / SECONDS_PER_DAY
}

/// Render a unix day as a calendar date, `YYYY-MM-DD`.
/// Days-to-civil conversion for the proleptic Gregorian calendar.
pub fn format_unix_day(day: u64) -> String {
    let z = day + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    format!("{:04}-{:02}-{:02}", y, m, d)
}

/// The lifecycle of a draw instance. The engine only ever persists
/// Completed entries; Scheduled and Cancelled belong to the external
/// scheduler, and Failed executions write nothing.
#[cw_serde]
pub enum DrawStatus {
    Scheduled,
    Executing,
    Completed,
    Cancelled,
    Failed,
}

/// Prize rank within a draw. Jackpot is rank 1 and the only rank whose
/// unclaimed amount rolls forward.
#[cw_serde]
pub enum PrizeRank {
    Jackpot,
    Second,
    Third,
    Concession,
}

impl PrizeRank {
    pub fn ordinal(&self) -> u8 {
        match self {
            PrizeRank::Jackpot => 1,
            PrizeRank::Second => 2,
            PrizeRank::Third => 3,
            PrizeRank::Concession => 4,
        }
    }
}

/// One prize tier of a draw category: `winner_count` winners each
/// receiving `amount`.
#[cw_serde]
pub struct PrizeTier {
    pub category: DrawCategory,
    pub rank: PrizeRank,
    pub label: String,
    pub amount: Uint128,
    pub winner_count: u32,
}

/// An identity-verification step a subscriber may have completed.
#[cw_serde]
pub enum KycRequirement {
    PhoneVerification,
    IdDocument,
    BankAccount,
}

impl KycRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycRequirement::PhoneVerification => "phone_verification",
            KycRequirement::IdDocument => "id_document",
            KycRequirement::BankAccount => "bank_account",
        }
    }
}

/// Validation outcome for a selected winner. PendingKyc is a provisional
/// award, not a failure.
#[cw_serde]
pub enum Validity {
    Valid,
    InvalidNotOptedIn,
    InvalidBlacklisted,
    PendingKyc,
}

impl Validity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Validity::Valid => "valid",
            Validity::InvalidNotOptedIn => "invalid_not_opted_in",
            Validity::InvalidBlacklisted => "invalid_blacklisted",
            Validity::PendingKyc => "pending_kyc",
        }
    }
}

/// A single top-up as reported by the billing provider. Amounts are whole
/// currency units.
#[cw_serde]
pub struct Topup {
    pub amount: Uint128,
    pub date: Timestamp,
    pub channel: String,
}

/// Subscriber snapshot supplied by the external provider per draw
/// invocation. Read-only to the engine.
#[cw_serde]
pub struct Subscriber {
    pub msisdn: String,
    pub opted_in: bool,
    pub blacklisted: bool,
    pub kyc_completed: Vec<KycRequirement>,
    pub topups: Vec<Topup>,
}

/// Why a subscriber did not qualify for a draw. NoTopups means the top-up
/// history was empty; NoQualifyingTopup means none fell inside the window.
#[cw_serde]
pub enum IneligibilityReason {
    NotOptedIn,
    Blacklisted,
    NoTopups,
    NoQualifyingTopup,
    DigitNotEligibleForDay,
}

impl IneligibilityReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibilityReason::NotOptedIn => "not_opted_in",
            IneligibilityReason::Blacklisted => "blacklisted",
            IneligibilityReason::NoTopups => "no_topups",
            IneligibilityReason::NoQualifyingTopup => "no_qualifying_topup",
            IneligibilityReason::DigitNotEligibleForDay => "digit_not_eligible_for_day",
        }
    }
}

#[cw_serde]
pub struct EligibilityResult {
    pub eligible: bool,
    pub reason: Option<IneligibilityReason>,
    pub qualifying_topup: Option<Topup>,
}

impl EligibilityResult {
    pub fn eligible(qualifying_topup: Topup) -> Self {
        EligibilityResult {
            eligible: true,
            reason: None,
            qualifying_topup: Some(qualifying_topup),
        }
    }

    pub fn ineligible(reason: IneligibilityReason) -> Self {
        EligibilityResult {
            eligible: false,
            reason: Some(reason),
            qualifying_topup: None,
        }
    }
}
