use cosmwasm_std::Uint128;
use recharge_rewards_common::shuffle::{shuffle, DrawRng};
use recharge_rewards_common::types::{PrizeRank, PrizeTier, Subscriber, Validity};
use recharge_rewards_common::validate::validate_winner;

use crate::error::ContractError;
use crate::state::{RolloverOutcome, Winner};

pub struct SelectionOutcome {
    pub winners: Vec<Winner>,
    pub rollover_outcome: RolloverOutcome,
    pub rollover_after: Uint128,
}

/// Draw winners for every tier slot from the eligible pool, validate each,
/// and settle the jackpot's rollover effect.
///
/// Winners are taken without replacement in tier order, jackpot first; a
/// pool smaller than the slot count fills as many slots as it can and
/// leaves the rest empty. Only the jackpot slot moves the rollover: a valid
/// jackpot resets it, a voided jackpot adds the full awarded amount (base
/// plus prior rollover) to it, and a KYC-suspended jackpot leaves it alone.
///
/// Pure apart from the rng stream; callers persist the outcome.
pub fn run_draw(
    pool: &[Subscriber],
    tiers: &[PrizeTier],
    rollover_before: Uint128,
    rng: &mut DrawRng,
) -> Result<SelectionOutcome, ContractError> {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    shuffle(&mut order, rng);

    let slots = tiers
        .iter()
        .flat_map(|tier| std::iter::repeat(tier).take(tier.winner_count as usize));

    let mut winners = Vec::new();
    let mut rollover_outcome = RolloverOutcome::Unchanged;
    let mut rollover_after = rollover_before;

    for (tier, idx) in slots.zip(order.into_iter()) {
        let subscriber = &pool[idx];
        let awarded = if tier.rank == PrizeRank::Jackpot {
            tier.amount
                .checked_add(rollover_before)
                .map_err(|_| ContractError::InvariantViolation {
                    reason: "jackpot plus rollover overflowed".to_string(),
                })?
        } else {
            tier.amount
        };

        let outcome = validate_winner(subscriber, awarded);

        if tier.rank == PrizeRank::Jackpot {
            (rollover_outcome, rollover_after) = match outcome.validity {
                Validity::Valid => (RolloverOutcome::Reset, Uint128::zero()),
                Validity::InvalidNotOptedIn | Validity::InvalidBlacklisted => (
                    RolloverOutcome::RolledOver,
                    rollover_before.checked_add(awarded).map_err(|_| {
                        ContractError::InvariantViolation {
                            reason: "rollover accumulation overflowed".to_string(),
                        }
                    })?,
                ),
                Validity::PendingKyc => (RolloverOutcome::Unchanged, rollover_before),
            };
        }

        winners.push(Winner {
            msisdn: subscriber.msisdn.clone(),
            tier: tier.clone(),
            validity: outcome.validity,
            pending_kyc: outcome.missing_kyc,
            awarded_amount: awarded,
        });
    }

    Ok(SelectionOutcome {
        winners,
        rollover_outcome,
        rollover_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use recharge_rewards_common::prizes::PrizeStructure;
    use recharge_rewards_common::types::{DrawCategory, KycRequirement};

    fn full_kyc() -> Vec<KycRequirement> {
        vec![
            KycRequirement::PhoneVerification,
            KycRequirement::IdDocument,
            KycRequirement::BankAccount,
        ]
    }

    fn subscriber(msisdn: &str, blacklisted: bool, kyc: Vec<KycRequirement>) -> Subscriber {
        Subscriber {
            msisdn: msisdn.to_string(),
            opted_in: true,
            blacklisted,
            kyc_completed: kyc,
            topups: vec![],
        }
    }

    fn clean_pool(size: usize) -> Vec<Subscriber> {
        (0..size)
            .map(|i| subscriber(&format!("234801000{:04}", i), false, full_kyc()))
            .collect()
    }

    fn weekday_tiers() -> Vec<PrizeTier> {
        PrizeStructure::standard().tiers_for(&DrawCategory::Weekday)
    }

    fn saturday_tiers() -> Vec<PrizeTier> {
        PrizeStructure::standard().tiers_for(&DrawCategory::Saturday)
    }

    #[test]
    fn test_full_pool_fills_every_slot_in_rank_order() {
        let pool = clean_pool(12);
        let mut rng = DrawRng::from_seed([1u8; 32]);
        let outcome = run_draw(&pool, &weekday_tiers(), Uint128::zero(), &mut rng).unwrap();

        assert_eq!(outcome.winners.len(), 10);
        assert_eq!(outcome.winners[0].tier.rank, PrizeRank::Jackpot);
        assert_eq!(outcome.winners[1].tier.rank, PrizeRank::Second);
        assert_eq!(outcome.winners[2].tier.rank, PrizeRank::Third);
        for winner in &outcome.winners[3..] {
            assert_eq!(winner.tier.rank, PrizeRank::Concession);
        }

        // Awarded amounts follow the standard catalog.
        assert_eq!(outcome.winners[0].awarded_amount, Uint128::new(1_000_000));
        assert_eq!(outcome.winners[1].awarded_amount, Uint128::new(350_000));
        assert_eq!(outcome.winners[2].awarded_amount, Uint128::new(150_000));
        assert_eq!(outcome.winners[9].awarded_amount, Uint128::new(75_000));

        // Selection is without replacement.
        let mut msisdns: Vec<&str> = outcome.winners.iter().map(|w| w.msisdn.as_str()).collect();
        msisdns.sort_unstable();
        msisdns.dedup();
        assert_eq!(msisdns.len(), 10);
    }

    #[test]
    fn test_small_pool_fills_top_tiers_only() {
        // Three eligible subscribers fill jackpot, second and third; the
        // concession tier gets no winners and that is not an error.
        let pool = clean_pool(3);
        let mut rng = DrawRng::from_seed([2u8; 32]);
        let outcome = run_draw(&pool, &weekday_tiers(), Uint128::zero(), &mut rng).unwrap();

        assert_eq!(outcome.winners.len(), 3);
        assert_eq!(outcome.winners[0].tier.rank, PrizeRank::Jackpot);
        assert_eq!(outcome.winners[1].tier.rank, PrizeRank::Second);
        assert_eq!(outcome.winners[2].tier.rank, PrizeRank::Third);
        assert_eq!(outcome.winners[0].validity, Validity::Valid);
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::Reset);
        assert_eq!(outcome.rollover_after, Uint128::zero());
    }

    #[test]
    fn test_blacklisted_jackpot_rolls_over_full_amount() {
        // Every pool member blacklisted, so the jackpot winner is voided
        // whoever the shuffle picks. Prior rollover zero: afterwards the
        // balance holds exactly one jackpot.
        let pool: Vec<Subscriber> = (0..3)
            .map(|i| subscriber(&format!("23480200000{}", i), true, full_kyc()))
            .collect();
        let mut rng = DrawRng::from_seed([3u8; 32]);
        let outcome = run_draw(&pool, &weekday_tiers(), Uint128::zero(), &mut rng).unwrap();

        assert_eq!(outcome.winners[0].validity, Validity::InvalidBlacklisted);
        assert_eq!(outcome.winners[0].awarded_amount, Uint128::new(1_000_000));
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::RolledOver);
        assert_eq!(outcome.rollover_after, Uint128::new(1_000_000));
    }

    #[test]
    fn test_consecutive_voided_jackpots_accumulate() {
        // Each voided jackpot adds its full awarded amount (base plus prior
        // rollover) to the ledger: 0 -> 1,000,000 -> 3,000,000.
        let pool: Vec<Subscriber> = (0..5)
            .map(|i| subscriber(&format!("23480300000{}", i), true, full_kyc()))
            .collect();
        let tiers = weekday_tiers();

        let mut rng = DrawRng::from_seed([4u8; 32]);
        let first = run_draw(&pool, &tiers, Uint128::zero(), &mut rng).unwrap();
        assert_eq!(first.rollover_after, Uint128::new(1_000_000));

        let mut rng = DrawRng::from_seed([5u8; 32]);
        let second = run_draw(&pool, &tiers, first.rollover_after, &mut rng).unwrap();
        assert_eq!(second.winners[0].awarded_amount, Uint128::new(2_000_000));
        assert_eq!(second.rollover_outcome, RolloverOutcome::RolledOver);
        assert_eq!(second.rollover_after, Uint128::new(3_000_000));
    }

    #[test]
    fn test_valid_saturday_jackpot_pays_rollover_and_resets() {
        let pool = clean_pool(4);
        let mut rng = DrawRng::from_seed([6u8; 32]);
        let outcome = run_draw(
            &pool,
            &saturday_tiers(),
            Uint128::new(500_000),
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome.winners[0].validity, Validity::Valid);
        assert_eq!(outcome.winners[0].awarded_amount, Uint128::new(3_500_000));
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::Reset);
        assert_eq!(outcome.rollover_after, Uint128::zero());
        // Non-jackpot slots never include the rollover.
        assert_eq!(outcome.winners[1].awarded_amount, Uint128::new(1_050_000));
    }

    #[test]
    fn test_pending_kyc_jackpot_leaves_rollover_in_flight() {
        // No KYC completed anywhere: the jackpot is provisionally awarded,
        // neither reset nor rolled over.
        let pool: Vec<Subscriber> = (0..3)
            .map(|i| subscriber(&format!("23480400000{}", i), false, vec![]))
            .collect();
        let mut rng = DrawRng::from_seed([7u8; 32]);
        let before = Uint128::new(250_000);
        let outcome = run_draw(&pool, &weekday_tiers(), before, &mut rng).unwrap();

        assert_eq!(outcome.winners[0].validity, Validity::PendingKyc);
        assert_eq!(outcome.winners[0].awarded_amount, Uint128::new(1_250_000));
        assert_eq!(
            outcome.winners[0].pending_kyc,
            vec![
                KycRequirement::PhoneVerification,
                KycRequirement::IdDocument,
                KycRequirement::BankAccount,
            ]
        );
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::Unchanged);
        assert_eq!(outcome.rollover_after, before);
    }

    #[test]
    fn test_non_jackpot_invalid_winner_does_not_touch_rollover() {
        // The shuffle order depends only on the seed and the pool size, so
        // a first pass tells us who lands in the second-prize slot; rerun
        // with that subscriber blacklisted.
        let seed = [8u8; 32];
        let pool = clean_pool(6);
        let mut rng = DrawRng::from_seed(seed);
        let scout = run_draw(&pool, &weekday_tiers(), Uint128::zero(), &mut rng).unwrap();
        let second_msisdn = scout.winners[1].msisdn.clone();

        let dirty: Vec<Subscriber> = pool
            .into_iter()
            .map(|mut s| {
                if s.msisdn == second_msisdn {
                    s.blacklisted = true;
                }
                s
            })
            .collect();
        let mut rng = DrawRng::from_seed(seed);
        let outcome = run_draw(&dirty, &weekday_tiers(), Uint128::zero(), &mut rng).unwrap();

        assert_eq!(outcome.winners[1].msisdn, second_msisdn);
        assert_eq!(outcome.winners[1].validity, Validity::InvalidBlacklisted);
        // Jackpot stayed valid, so the rollover resets regardless of the
        // voided second prize.
        assert_eq!(outcome.winners[0].validity, Validity::Valid);
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::Reset);
        assert_eq!(outcome.rollover_after, Uint128::zero());
    }

    #[test]
    fn test_not_opted_in_jackpot_also_rolls_over() {
        let pool: Vec<Subscriber> = (0..2)
            .map(|i| {
                let mut s = subscriber(&format!("23480500000{}", i), false, full_kyc());
                s.opted_in = false;
                s
            })
            .collect();
        let mut rng = DrawRng::from_seed([9u8; 32]);
        let outcome = run_draw(&pool, &weekday_tiers(), Uint128::new(100_000), &mut rng).unwrap();

        assert_eq!(outcome.winners[0].validity, Validity::InvalidNotOptedIn);
        // 100,000 + (1,000,000 + 100,000) = 1,200,000.
        assert_eq!(outcome.rollover_after, Uint128::new(1_200_000));
    }

    #[test]
    fn test_empty_pool_yields_no_winners() {
        let mut rng = DrawRng::from_seed([10u8; 32]);
        let outcome = run_draw(&[], &weekday_tiers(), Uint128::new(42), &mut rng).unwrap();
        assert!(outcome.winners.is_empty());
        assert_eq!(outcome.rollover_outcome, RolloverOutcome::Unchanged);
        assert_eq!(outcome.rollover_after, Uint128::new(42));
    }

    #[test]
    fn test_same_seed_reproduces_winner_sequence() {
        let pool = clean_pool(12);
        let tiers = weekday_tiers();

        let mut rng = DrawRng::from_seed([11u8; 32]);
        let first = run_draw(&pool, &tiers, Uint128::zero(), &mut rng).unwrap();
        let mut rng = DrawRng::from_seed([11u8; 32]);
        let second = run_draw(&pool, &tiers, Uint128::zero(), &mut rng).unwrap();

        let first_order: Vec<&str> = first.winners.iter().map(|w| w.msisdn.as_str()).collect();
        let second_order: Vec<&str> = second.winners.iter().map(|w| w.msisdn.as_str()).collect();
        assert_eq!(first_order, second_order);
    }
}
