use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use recharge_rewards_common::prizes::PrizeStructure;
use recharge_rewards_common::types::{
    DrawCategory, DrawStatus, KycRequirement, PrizeTier, Validity, Weekday,
};

pub const CONFIG: Item<EngineConfig> = Item::new("config");
pub const ENGINE_STATE: Item<EngineState> = Item::new("engine_state");

/// Accumulated unclaimed jackpot per draw category, keyed by category name.
pub const ROLLOVERS: Map<&str, RolloverRecord> = Map::new("rollovers");

/// Completed draws, keyed by (category name, unix day of the draw date).
/// The key doubles as the idempotency check: one draw per category per day.
pub const DRAWS: Map<(&str, u64), DrawRecord> = Map::new("draws");

/// Per-subscriber win tracking
pub const SUBSCRIBER_WINS: Map<(&str, u64), SubscriberWin> = Map::new("subscriber_wins");
pub const MSISDN_WIN_COUNT: Map<&str, u32> = Map::new("msisdn_win_count");
pub const MSISDN_TOTAL_WON: Map<&str, Uint128> = Map::new("msisdn_total_won");

#[cw_serde]
pub struct EngineConfig {
    pub admin: Addr,
    pub operator: Addr,
    pub prizes: PrizeStructure,
    /// Bumped whenever the prize catalog changes; each draw records the
    /// version it paid under.
    pub config_version: u64,
}

#[cw_serde]
pub struct EngineState {
    pub next_draw_id: u64,
    pub draws_completed: u64,
    pub winners_recorded: u64,
    /// Sum of amounts awarded to valid and KYC-pending winners.
    pub total_awarded: Uint128,
}

#[cw_serde]
pub struct RolloverRecord {
    pub category: DrawCategory,
    pub amount: Uint128,
    pub last_updated_draw_id: Option<u64>,
}

/// How the jackpot outcome of a draw settled the category's rollover.
#[cw_serde]
pub enum RolloverOutcome {
    /// Jackpot paid to a valid winner; the balance reset to zero.
    Reset,
    /// Jackpot voided; the full jackpot (base plus prior rollover) was
    /// added to the balance.
    RolledOver,
    /// Jackpot suspended pending KYC; the balance is untouched.
    Unchanged,
}

impl RolloverOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolloverOutcome::Reset => "reset",
            RolloverOutcome::RolledOver => "rolled_over",
            RolloverOutcome::Unchanged => "unchanged",
        }
    }
}

#[cw_serde]
pub struct Winner {
    pub msisdn: String,
    pub tier: PrizeTier,
    pub validity: Validity,
    /// KYC steps still outstanding when validity is PendingKyc.
    pub pending_kyc: Vec<KycRequirement>,
    /// Tier amount, plus the pre-draw rollover for the jackpot rank.
    pub awarded_amount: Uint128,
}

#[cw_serde]
pub struct DrawRecord {
    pub draw_id: u64,
    pub category: DrawCategory,
    pub draw_date: Timestamp,
    /// Unix day of `draw_date`; the second half of the storage key.
    pub day: u64,
    pub weekday: Weekday,
    pub status: DrawStatus,
    pub executed_at: Timestamp,
    pub config_version: u64,
    pub pool_size: u32,
    pub eligible_count: u32,
    pub winners: Vec<Winner>,
    pub rollover_before: Uint128,
    pub rollover_after: Uint128,
    pub rollover_outcome: RolloverOutcome,
}

/// One win as seen from the subscriber side, denormalized so the wins
/// query needs no join against DRAWS.
#[cw_serde]
pub struct SubscriberWin {
    pub draw_id: u64,
    pub category: DrawCategory,
    pub day: u64,
    pub rank_label: String,
    pub awarded_amount: Uint128,
    pub validity: Validity,
}
