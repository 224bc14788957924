use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

use crate::types::{DrawCategory, PrizeRank, PrizeTier};

/// Per-category prize amounts, in whole currency units. The tier shape is
/// fixed (one jackpot, one second, one third, `concession_winners`
/// concession prizes sharing one amount); only the amounts are
/// configuration.
#[cw_serde]
pub struct PrizeAmounts {
    pub jackpot: Uint128,
    pub second: Uint128,
    pub third: Uint128,
    pub concession: Uint128,
    pub concession_winners: u32,
}

/// The full prize catalog, one amount set per draw category. Immutable for
/// a given engine config version.
#[cw_serde]
pub struct PrizeStructure {
    pub weekday: PrizeAmounts,
    pub saturday: PrizeAmounts,
}

/// Validation failure for a prize structure.
#[derive(Debug, PartialEq)]
pub enum PrizeStructureError {
    ZeroAmount { category: DrawCategory },
    NotDescending { category: DrawCategory },
    NoConcessionWinners { category: DrawCategory },
    SaturdayJackpotNotLarger,
}

impl std::fmt::Display for PrizeStructureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeStructureError::ZeroAmount { category } => {
                write!(f, "{} prize amounts must all be positive", category.as_str())
            }
            PrizeStructureError::NotDescending { category } => write!(
                f,
                "{} amounts must descend: jackpot > second > third >= concession",
                category.as_str()
            ),
            PrizeStructureError::NoConcessionWinners { category } => write!(
                f,
                "{} concession tier needs at least one winner slot",
                category.as_str()
            ),
            PrizeStructureError::SaturdayJackpotNotLarger => {
                write!(f, "saturday jackpot must exceed the weekday jackpot")
            }
        }
    }
}

impl PrizeAmounts {
    fn validate(&self, category: &DrawCategory) -> Result<(), PrizeStructureError> {
        let category = category.clone();
        if self.jackpot.is_zero()
            || self.second.is_zero()
            || self.third.is_zero()
            || self.concession.is_zero()
        {
            return Err(PrizeStructureError::ZeroAmount { category });
        }
        if self.jackpot <= self.second || self.second <= self.third || self.third < self.concession
        {
            return Err(PrizeStructureError::NotDescending { category });
        }
        if self.concession_winners == 0 {
            return Err(PrizeStructureError::NoConcessionWinners { category });
        }
        Ok(())
    }
}

impl PrizeStructure {
    /// The standard promotion catalog: the weekday draw pays a 1,000,000
    /// jackpot and Saturday triples every amount.
    pub fn standard() -> Self {
        PrizeStructure {
            weekday: PrizeAmounts {
                jackpot: Uint128::new(1_000_000),
                second: Uint128::new(350_000),
                third: Uint128::new(150_000),
                concession: Uint128::new(75_000),
                concession_winners: 7,
            },
            saturday: PrizeAmounts {
                jackpot: Uint128::new(3_000_000),
                second: Uint128::new(1_050_000),
                third: Uint128::new(450_000),
                concession: Uint128::new(225_000),
                concession_winners: 7,
            },
        }
    }

    pub fn validate(&self) -> Result<(), PrizeStructureError> {
        self.weekday.validate(&DrawCategory::Weekday)?;
        self.saturday.validate(&DrawCategory::Saturday)?;
        if self.saturday.jackpot <= self.weekday.jackpot {
            return Err(PrizeStructureError::SaturdayJackpotNotLarger);
        }
        Ok(())
    }

    pub fn amounts_for(&self, category: &DrawCategory) -> &PrizeAmounts {
        match category {
            DrawCategory::Weekday => &self.weekday,
            DrawCategory::Saturday => &self.saturday,
        }
    }

    /// The ordered tier list for a category, jackpot first.
    pub fn tiers_for(&self, category: &DrawCategory) -> Vec<PrizeTier> {
        let amounts = self.amounts_for(category);
        vec![
            PrizeTier {
                category: category.clone(),
                rank: PrizeRank::Jackpot,
                label: "Jackpot".to_string(),
                amount: amounts.jackpot,
                winner_count: 1,
            },
            PrizeTier {
                category: category.clone(),
                rank: PrizeRank::Second,
                label: "Second Prize".to_string(),
                amount: amounts.second,
                winner_count: 1,
            },
            PrizeTier {
                category: category.clone(),
                rank: PrizeRank::Third,
                label: "Third Prize".to_string(),
                amount: amounts.third,
                winner_count: 1,
            },
            PrizeTier {
                category: category.clone(),
                rank: PrizeRank::Concession,
                label: "Concession Prize".to_string(),
                amount: amounts.concession,
                winner_count: amounts.concession_winners,
            },
        ]
    }

    /// Total prize pool for one draw of `category`:
    /// Σ(amount × winner_count) plus the category's current rollover.
    pub fn total_pool(&self, category: &DrawCategory, rollover: Uint128) -> Uint128 {
        self.tiers_for(category)
            .iter()
            .fold(rollover, |acc, tier| {
                acc + tier.amount * Uint128::from(tier.winner_count)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_structure_is_valid() {
        let prizes = PrizeStructure::standard();
        prizes.validate().unwrap();
        assert!(prizes.saturday.jackpot > prizes.weekday.jackpot);
    }

    #[test]
    fn test_tier_shape_and_order() {
        let prizes = PrizeStructure::standard();
        let tiers = prizes.tiers_for(&DrawCategory::Weekday);
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[0].rank, PrizeRank::Jackpot);
        assert_eq!(tiers[0].winner_count, 1);
        assert_eq!(tiers[3].rank, PrizeRank::Concession);
        assert_eq!(tiers[3].winner_count, 7);
        // Amounts descend through the ranked tiers.
        assert!(tiers[0].amount > tiers[1].amount);
        assert!(tiers[1].amount > tiers[2].amount);
        assert!(tiers[2].amount >= tiers[3].amount);
        // Total winner slots for one draw: 1 + 1 + 1 + 7.
        let slots: u32 = tiers.iter().map(|t| t.winner_count).sum();
        assert_eq!(slots, 10);
    }

    #[test]
    fn test_total_pool_includes_rollover() {
        let prizes = PrizeStructure::standard();
        // 1_000_000 + 350_000 + 150_000 + 7 × 75_000 = 2_025_000.
        assert_eq!(
            prizes.total_pool(&DrawCategory::Weekday, Uint128::zero()),
            Uint128::new(2_025_000)
        );
        assert_eq!(
            prizes.total_pool(&DrawCategory::Weekday, Uint128::new(500_000)),
            Uint128::new(2_525_000)
        );
    }

    #[test]
    fn test_validate_rejects_zero_amounts() {
        let mut prizes = PrizeStructure::standard();
        prizes.weekday.third = Uint128::zero();
        assert_eq!(
            prizes.validate(),
            Err(PrizeStructureError::ZeroAmount {
                category: DrawCategory::Weekday
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_descending_amounts() {
        let mut prizes = PrizeStructure::standard();
        prizes.saturday.second = prizes.saturday.jackpot;
        assert_eq!(
            prizes.validate(),
            Err(PrizeStructureError::NotDescending {
                category: DrawCategory::Saturday
            })
        );

        let mut prizes = PrizeStructure::standard();
        prizes.weekday.concession = prizes.weekday.third + Uint128::new(1);
        assert_eq!(
            prizes.validate(),
            Err(PrizeStructureError::NotDescending {
                category: DrawCategory::Weekday
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_concession_tier() {
        let mut prizes = PrizeStructure::standard();
        prizes.weekday.concession_winners = 0;
        assert_eq!(
            prizes.validate(),
            Err(PrizeStructureError::NoConcessionWinners {
                category: DrawCategory::Weekday
            })
        );
    }

    #[test]
    fn test_validate_rejects_small_saturday_jackpot() {
        let mut prizes = PrizeStructure::standard();
        prizes.saturday.jackpot = prizes.weekday.jackpot;
        // Keep the rest of the saturday column descending below it.
        prizes.saturday.second = Uint128::new(350_000);
        prizes.saturday.third = Uint128::new(150_000);
        prizes.saturday.concession = Uint128::new(75_000);
        assert_eq!(
            prizes.validate(),
            Err(PrizeStructureError::SaturdayJackpotNotLarger)
        );
    }

    #[test]
    fn test_concession_may_equal_third() {
        let mut prizes = PrizeStructure::standard();
        prizes.weekday.concession = prizes.weekday.third;
        prizes.validate().unwrap();
    }
}
