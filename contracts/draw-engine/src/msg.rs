use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint128};
use recharge_rewards_common::prizes::{PrizeAmounts, PrizeStructure};
use recharge_rewards_common::types::{
    DrawCategory, PrizeTier, Subscriber, Topup, Weekday,
};

use crate::state::{DrawRecord, EngineConfig, EngineState, RolloverRecord, SubscriberWin};

#[cw_serde]
pub struct InstantiateMsg {
    pub operator: String,
    /// Prize catalog; omitted means the standard catalog.
    pub prizes: Option<PrizeStructure>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Run one draw over the supplied subscriber pool. Operator or admin.
    ExecuteDraw {
        category: DrawCategory,
        /// Official draw date; weekday and the per-day idempotency key are
        /// derived from it.
        draw_date: Timestamp,
        pool: Vec<Subscriber>,
        /// 32-byte selection seed, hex-encoded.
        randomness: String,
    },
    /// Update configuration. Admin only. Changing prize amounts bumps the
    /// config version.
    UpdateConfig {
        operator: Option<String>,
        weekday_prizes: Option<PrizeAmounts>,
        saturday_prizes: Option<PrizeAmounts>,
    },
}

/// Parameters for `ExecuteMsg::ExecuteDraw`.
pub struct ExecuteDrawParams {
    pub category: DrawCategory,
    pub draw_date: Timestamp,
    pub pool: Vec<Subscriber>,
    pub randomness: String,
}

/// Parameters for `ExecuteMsg::UpdateConfig`.
pub struct UpdateConfigParams {
    pub operator: Option<String>,
    pub weekday_prizes: Option<PrizeAmounts>,
    pub saturday_prizes: Option<PrizeAmounts>,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(EngineConfig)]
    Config {},
    #[returns(EngineState)]
    EngineState {},
    /// Tier list for a category plus the pool total including the
    /// category's current rollover.
    #[returns(PrizeTiersResponse)]
    PrizeTiers { category: DrawCategory },
    #[returns(RolloverRecord)]
    Rollover { category: DrawCategory },
    #[returns(RolloversResponse)]
    Rollovers {},
    #[returns(DrawRecord)]
    Draw { category: DrawCategory, day: u64 },
    #[returns(DrawHistoryResponse)]
    DrawHistory {
        category: DrawCategory,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(SubscriberWinsResponse)]
    SubscriberWins {
        msisdn: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Dry-run the eligibility rules for one subscriber against a draw
    /// date. The category is derived from the date.
    #[returns(EligibilityResponse)]
    CheckEligibility {
        draw_date: Timestamp,
        subscriber: Subscriber,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct PrizeTiersResponse {
    pub category: DrawCategory,
    pub tiers: Vec<PrizeTier>,
    pub rollover: Uint128,
    pub total_pool: Uint128,
}

#[cw_serde]
pub struct RolloversResponse {
    pub rollovers: Vec<RolloverRecord>,
}

#[cw_serde]
pub struct DrawHistoryResponse {
    pub draws: Vec<DrawRecord>,
}

#[cw_serde]
pub struct SubscriberWinsResponse {
    pub msisdn: String,
    pub total_wins: u32,
    pub total_won_amount: Uint128,
    pub wins: Vec<SubscriberWin>,
}

#[cw_serde]
pub struct EligibilityResponse {
    pub category: DrawCategory,
    pub weekday: Weekday,
    pub eligible: bool,
    pub reason: Option<String>,
    pub qualifying_topup: Option<Topup>,
}
