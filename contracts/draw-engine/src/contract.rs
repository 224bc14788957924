use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use recharge_rewards_common::prizes::PrizeStructure;
use recharge_rewards_common::types::DrawCategory;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{
    ExecuteDrawParams, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateConfigParams,
};
use crate::query;
use crate::state::{EngineConfig, EngineState, RolloverRecord, CONFIG, ENGINE_STATE, ROLLOVERS};

const CONTRACT_NAME: &str = "crates.io:recharge-draw-engine";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let prizes = msg.prizes.unwrap_or_else(PrizeStructure::standard);
    prizes
        .validate()
        .map_err(|e| ContractError::InvalidPrizeStructure {
            reason: e.to_string(),
        })?;

    let config = EngineConfig {
        admin: info.sender.clone(),
        operator: deps.api.addr_validate(&msg.operator)?,
        prizes,
        config_version: 1,
    };
    CONFIG.save(deps.storage, &config)?;

    ENGINE_STATE.save(
        deps.storage,
        &EngineState {
            next_draw_id: 0,
            draws_completed: 0,
            winners_recorded: 0,
            total_awarded: Uint128::zero(),
        },
    )?;

    for category in [DrawCategory::Weekday, DrawCategory::Saturday] {
        ROLLOVERS.save(
            deps.storage,
            category.as_str(),
            &RolloverRecord {
                category: category.clone(),
                amount: Uint128::zero(),
                last_updated_draw_id: None,
            },
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "draw-engine")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ExecuteDraw {
            category,
            draw_date,
            pool,
            randomness,
        } => execute::execute_draw(
            deps,
            env,
            info,
            ExecuteDrawParams {
                category,
                draw_date,
                pool,
                randomness,
            },
        ),
        ExecuteMsg::UpdateConfig {
            operator,
            weekday_prizes,
            saturday_prizes,
        } => execute::update_config(
            deps,
            env,
            info,
            UpdateConfigParams {
                operator,
                weekday_prizes,
                saturday_prizes,
            },
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::EngineState {} => query::query_engine_state(deps),
        QueryMsg::PrizeTiers { category } => query::query_prize_tiers(deps, category),
        QueryMsg::Rollover { category } => query::query_rollover(deps, category),
        QueryMsg::Rollovers {} => query::query_rollovers(deps),
        QueryMsg::Draw { category, day } => query::query_draw(deps, category, day),
        QueryMsg::DrawHistory {
            category,
            start_after,
            limit,
        } => query::query_draw_history(deps, category, start_after, limit),
        QueryMsg::SubscriberWins {
            msisdn,
            start_after,
            limit,
        } => query::query_subscriber_wins(deps, msisdn, start_after, limit),
        QueryMsg::CheckEligibility {
            draw_date,
            subscriber,
        } => query::query_check_eligibility(deps, draw_date, subscriber),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
