use cosmwasm_std::Timestamp;

use crate::types::{
    DrawCategory, EligibilityResult, IneligibilityReason, Subscriber, Topup, Weekday,
    SECONDS_PER_DAY,
};

/// Qualifying window for weekday draws, measured backward from the draw's
/// execution instant.
pub const WEEKDAY_WINDOW_SECONDS: u64 = SECONDS_PER_DAY;
/// Qualifying window for Saturday draws.
pub const SATURDAY_WINDOW_SECONDS: u64 = 7 * SECONDS_PER_DAY;

pub fn qualifying_window_seconds(category: &DrawCategory) -> u64 {
    match category {
        DrawCategory::Weekday => WEEKDAY_WINDOW_SECONDS,
        DrawCategory::Saturday => SATURDAY_WINDOW_SECONDS,
    }
}

/// MSISDN last digits drawn on each weekday. Saturday (and the never-drawn
/// Sunday) carry no digit restriction. The five sets are pairwise disjoint
/// and together cover exactly 0..=9.
pub fn digit_set_for(weekday: &Weekday) -> Option<[u8; 2]> {
    match weekday {
        Weekday::Monday => Some([0, 1]),
        Weekday::Tuesday => Some([2, 3]),
        Weekday::Wednesday => Some([4, 5]),
        Weekday::Thursday => Some([6, 7]),
        Weekday::Friday => Some([8, 9]),
        Weekday::Saturday | Weekday::Sunday => None,
    }
}

fn last_digit(msisdn: &str) -> Option<u8> {
    msisdn
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
}

fn in_window(topup: &Topup, draw_at: Timestamp, window_seconds: u64) -> bool {
    topup.date <= draw_at && draw_at.seconds() - topup.date.seconds() <= window_seconds
}

/// Decide whether `subscriber` qualifies for a draw of `category` held on
/// `weekday` at instant `draw_at`.
///
/// Rules run in order and short-circuit; the first failing rule determines
/// the reason:
/// 1. opted in,
/// 2. not blacklisted,
/// 3. has at least one top-up,
/// 4. at least one top-up inside the category's qualifying window
///    (bounds inclusive); the earliest such top-up qualifies,
/// 5. weekday draws only: MSISDN last digit belongs to the weekday's set.
///
/// Pure and deterministic: identical input yields identical output.
pub fn evaluate(
    subscriber: &Subscriber,
    category: &DrawCategory,
    weekday: &Weekday,
    draw_at: Timestamp,
) -> EligibilityResult {
    if !subscriber.opted_in {
        return EligibilityResult::ineligible(IneligibilityReason::NotOptedIn);
    }
    if subscriber.blacklisted {
        return EligibilityResult::ineligible(IneligibilityReason::Blacklisted);
    }
    if subscriber.topups.is_empty() {
        return EligibilityResult::ineligible(IneligibilityReason::NoTopups);
    }

    let window = qualifying_window_seconds(category);
    let qualifying = subscriber
        .topups
        .iter()
        .filter(|t| in_window(t, draw_at, window))
        .min_by_key(|t| t.date);
    let qualifying = match qualifying {
        Some(t) => t.clone(),
        None => return EligibilityResult::ineligible(IneligibilityReason::NoQualifyingTopup),
    };

    if let Some(digits) = digit_set_for(weekday) {
        match last_digit(&subscriber.msisdn) {
            Some(d) if digits.contains(&d) => {}
            _ => {
                return EligibilityResult::ineligible(IneligibilityReason::DigitNotEligibleForDay)
            }
        }
    }

    EligibilityResult::eligible(qualifying)
}
