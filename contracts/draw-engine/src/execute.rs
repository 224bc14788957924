use std::collections::BTreeSet;

use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};
use recharge_rewards_common::eligibility;
use recharge_rewards_common::shuffle::DrawRng;
use recharge_rewards_common::types::{
    format_unix_day, unix_day, DrawCategory, DrawStatus, Subscriber, Validity, Weekday,
};

use crate::error::ContractError;
use crate::msg::{ExecuteDrawParams, UpdateConfigParams};
use crate::selection;
use crate::state::{
    DrawRecord, RolloverOutcome, RolloverRecord, SubscriberWin, CONFIG, DRAWS, ENGINE_STATE,
    MSISDN_TOTAL_WON, MSISDN_WIN_COUNT, ROLLOVERS, SUBSCRIBER_WINS,
};

fn decode_seed(randomness: &str) -> Result<[u8; 32], ContractError> {
    let bytes = hex::decode(randomness).map_err(|_| ContractError::InvalidRandomness {
        reason: "not valid hex".to_string(),
    })?;
    bytes
        .try_into()
        .map_err(|_| ContractError::InvalidRandomness {
            reason: "seed must be exactly 32 bytes".to_string(),
        })
}

/// Run one draw. Operator or admin only.
///
/// Steps: resolve the calendar context from the draw date, reject
/// duplicates, filter the pool through the eligibility rules, select and
/// validate winners, settle the rollover, persist the completed draw.
/// Every fallible step runs before the first storage write, so a failed
/// call leaves no partial draw state.
pub fn execute_draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: ExecuteDrawParams,
) -> Result<Response, ContractError> {
    let ExecuteDrawParams {
        category,
        draw_date,
        pool,
        randomness,
    } = params;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator && info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only operator or admin can execute draws".to_string(),
        });
    }

    let day = unix_day(draw_date);
    let weekday = Weekday::from_timestamp(draw_date);
    let expected = DrawCategory::for_weekday(&weekday).ok_or_else(|| ContractError::NoDraw {
        date: format_unix_day(day),
    })?;
    if category != expected {
        return Err(ContractError::CategoryMismatch {
            category: category.as_str().to_string(),
            weekday: weekday.as_str().to_string(),
        });
    }

    if DRAWS.has(deps.storage, (category.as_str(), day)) {
        return Err(ContractError::DuplicateDraw {
            category: category.as_str().to_string(),
            date: format_unix_day(day),
        });
    }

    let seed = decode_seed(&randomness)?;

    let mut seen = BTreeSet::new();
    for subscriber in &pool {
        if !seen.insert(subscriber.msisdn.as_str()) {
            return Err(ContractError::DuplicateSubscriber {
                msisdn: subscriber.msisdn.clone(),
            });
        }
    }

    let pool_size = pool.len() as u32;
    let eligible: Vec<Subscriber> = pool
        .into_iter()
        .filter(|s| eligibility::evaluate(s, &category, &weekday, draw_date).eligible)
        .collect();
    if eligible.is_empty() {
        return Err(ContractError::NoEligibleSubscribers { pool_size });
    }
    let eligible_count = eligible.len() as u32;

    let rollover_before = ROLLOVERS.load(deps.storage, category.as_str())?.amount;
    let tiers = config.prizes.tiers_for(&category);

    let mut rng = DrawRng::from_seed(seed);
    let outcome = selection::run_draw(&eligible, &tiers, rollover_before, &mut rng)?;

    let mut awarded_total = Uint128::zero();
    for winner in &outcome.winners {
        if matches!(winner.validity, Validity::Valid | Validity::PendingKyc) {
            awarded_total += winner.awarded_amount;
        }
    }

    // Validation and selection are complete; only writes remain.
    let mut state = ENGINE_STATE.load(deps.storage)?;
    let draw_id = state.next_draw_id;
    state.next_draw_id += 1;
    state.draws_completed += 1;
    state.winners_recorded += outcome.winners.len() as u64;
    state.total_awarded += awarded_total;
    ENGINE_STATE.save(deps.storage, &state)?;

    if !matches!(outcome.rollover_outcome, RolloverOutcome::Unchanged) {
        ROLLOVERS.save(
            deps.storage,
            category.as_str(),
            &RolloverRecord {
                category: category.clone(),
                amount: outcome.rollover_after,
                last_updated_draw_id: Some(draw_id),
            },
        )?;
    }

    let record = DrawRecord {
        draw_id,
        category: category.clone(),
        draw_date,
        day,
        weekday: weekday.clone(),
        status: DrawStatus::Completed,
        executed_at: env.block.time,
        config_version: config.config_version,
        pool_size,
        eligible_count,
        winners: outcome.winners,
        rollover_before,
        rollover_after: outcome.rollover_after,
        rollover_outcome: outcome.rollover_outcome,
    };
    DRAWS.save(deps.storage, (category.as_str(), day), &record)?;

    for winner in &record.winners {
        SUBSCRIBER_WINS.save(
            deps.storage,
            (winner.msisdn.as_str(), draw_id),
            &SubscriberWin {
                draw_id,
                category: category.clone(),
                day,
                rank_label: winner.tier.label.clone(),
                awarded_amount: winner.awarded_amount,
                validity: winner.validity.clone(),
            },
        )?;
        if matches!(winner.validity, Validity::Valid | Validity::PendingKyc) {
            let count = MSISDN_WIN_COUNT
                .may_load(deps.storage, winner.msisdn.as_str())?
                .unwrap_or(0);
            MSISDN_WIN_COUNT.save(deps.storage, winner.msisdn.as_str(), &(count + 1))?;
            let total = MSISDN_TOTAL_WON
                .may_load(deps.storage, winner.msisdn.as_str())?
                .unwrap_or(Uint128::zero());
            MSISDN_TOTAL_WON.save(
                deps.storage,
                winner.msisdn.as_str(),
                &(total + winner.awarded_amount),
            )?;
        }
    }

    let mut response = Response::new()
        .add_attribute("action", "execute_draw")
        .add_attribute("draw_id", draw_id.to_string())
        .add_attribute("category", category.as_str())
        .add_attribute("date", format_unix_day(day))
        .add_event(
            Event::new("lottery_draw_completed")
                .add_attribute("draw_id", draw_id.to_string())
                .add_attribute("category", category.as_str())
                .add_attribute("date", format_unix_day(day))
                .add_attribute("weekday", record.weekday.as_str())
                .add_attribute("pool_size", pool_size.to_string())
                .add_attribute("eligible_count", eligible_count.to_string())
                .add_attribute("winner_count", record.winners.len().to_string())
                .add_attribute("awarded_total", awarded_total.to_string())
                .add_attribute("rollover_before", rollover_before.to_string())
                .add_attribute("rollover_after", record.rollover_after.to_string())
                .add_attribute("rollover_outcome", record.rollover_outcome.as_str()),
        );
    for winner in &record.winners {
        response = response.add_event(
            Event::new("lottery_winner")
                .add_attribute("draw_id", draw_id.to_string())
                .add_attribute("msisdn", winner.msisdn.clone())
                .add_attribute("rank", winner.tier.rank.ordinal().to_string())
                .add_attribute("prize", winner.tier.label.clone())
                .add_attribute("amount", winner.awarded_amount.to_string())
                .add_attribute("validity", winner.validity.as_str()),
        );
    }

    Ok(response)
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        operator,
        weekday_prizes,
        saturday_prizes,
    } = params;

    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(op) = operator {
        config.operator = deps.api.addr_validate(&op)?;
    }

    let mut prizes_changed = false;
    if let Some(amounts) = weekday_prizes {
        config.prizes.weekday = amounts;
        prizes_changed = true;
    }
    if let Some(amounts) = saturday_prizes {
        config.prizes.saturday = amounts;
        prizes_changed = true;
    }
    if prizes_changed {
        config
            .prizes
            .validate()
            .map_err(|e| ContractError::InvalidPrizeStructure {
                reason: e.to_string(),
            })?;
        config.config_version += 1;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("config_version", config.config_version.to_string()))
}
