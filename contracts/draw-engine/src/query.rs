use cosmwasm_std::{
    to_json_binary, Binary, Deps, Order, StdError, StdResult, Timestamp, Uint128,
};
use cw_storage_plus::Bound;
use recharge_rewards_common::eligibility;
use recharge_rewards_common::types::{
    format_unix_day, unix_day, DrawCategory, Subscriber, Weekday,
};

use crate::msg::{
    DrawHistoryResponse, EligibilityResponse, PrizeTiersResponse, RolloversResponse,
    SubscriberWinsResponse,
};
use crate::state::{
    CONFIG, DRAWS, ENGINE_STATE, MSISDN_TOTAL_WON, MSISDN_WIN_COUNT, ROLLOVERS, SUBSCRIBER_WINS,
};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_engine_state(deps: Deps) -> StdResult<Binary> {
    let state = ENGINE_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_prize_tiers(deps: Deps, category: DrawCategory) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let rollover = ROLLOVERS.load(deps.storage, category.as_str())?.amount;
    let tiers = config.prizes.tiers_for(&category);
    let total_pool = config.prizes.total_pool(&category, rollover);
    to_json_binary(&PrizeTiersResponse {
        category,
        tiers,
        rollover,
        total_pool,
    })
}

pub fn query_rollover(deps: Deps, category: DrawCategory) -> StdResult<Binary> {
    let record = ROLLOVERS.load(deps.storage, category.as_str())?;
    to_json_binary(&record)
}

pub fn query_rollovers(deps: Deps) -> StdResult<Binary> {
    let rollovers: Vec<_> = ROLLOVERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .map(|(_, record)| record)
        .collect();
    to_json_binary(&RolloversResponse { rollovers })
}

pub fn query_draw(deps: Deps, category: DrawCategory, day: u64) -> StdResult<Binary> {
    let draw = DRAWS.load(deps.storage, (category.as_str(), day))?;
    to_json_binary(&draw)
}

pub fn query_draw_history(
    deps: Deps,
    category: DrawCategory,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let draws: Vec<_> = DRAWS
        .prefix(category.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, draw)| draw)
        .collect();

    to_json_binary(&DrawHistoryResponse { draws })
}

pub fn query_subscriber_wins(
    deps: Deps,
    msisdn: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let wins: Vec<_> = SUBSCRIBER_WINS
        .prefix(msisdn.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, win)| win)
        .collect();

    let total_wins = MSISDN_WIN_COUNT
        .may_load(deps.storage, msisdn.as_str())?
        .unwrap_or(0);
    let total_won = MSISDN_TOTAL_WON
        .may_load(deps.storage, msisdn.as_str())?
        .unwrap_or(Uint128::zero());

    to_json_binary(&SubscriberWinsResponse {
        msisdn,
        total_wins,
        total_won_amount: total_won,
        wins,
    })
}

pub fn query_check_eligibility(
    _deps: Deps,
    draw_date: Timestamp,
    subscriber: Subscriber,
) -> StdResult<Binary> {
    let weekday = Weekday::from_timestamp(draw_date);
    let category = DrawCategory::for_weekday(&weekday).ok_or_else(|| {
        StdError::generic_err(format!(
            "no draw is held on {} (sunday)",
            format_unix_day(unix_day(draw_date))
        ))
    })?;

    let result = eligibility::evaluate(&subscriber, &category, &weekday, draw_date);
    to_json_binary(&EligibilityResponse {
        category,
        weekday,
        eligible: result.eligible,
        reason: result.reason.map(|r| r.as_str().to_string()),
        qualifying_topup: result.qualifying_topup,
    })
}
