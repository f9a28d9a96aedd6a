use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateConfigParams};
use crate::query;
use crate::state::{
    DistributorConfig, CONFIG, DEFAULT_CLAIM_HISTORY_CAPACITY, DEFAULT_MAX_DRAWS_PER_CLAIM,
};

const CONTRACT_NAME: &str = "crates.io:lucky-prize-distributor";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let claim_history_capacity = msg
        .claim_history_capacity
        .unwrap_or(DEFAULT_CLAIM_HISTORY_CAPACITY);
    if claim_history_capacity == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "claim_history_capacity must be at least 1".to_string(),
        });
    }
    let max_draws_per_claim = execute::validate_max_draws_per_claim(
        msg.max_draws_per_claim
            .unwrap_or(DEFAULT_MAX_DRAWS_PER_CLAIM),
    )?;
    if msg.prize_denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "prize_denom must not be empty".to_string(),
        });
    }

    let config = DistributorConfig {
        admin: info.sender.clone(),
        draw_buffer: deps.api.addr_validate(&msg.draw_buffer)?,
        prize_config_buffer: deps.api.addr_validate(&msg.prize_config_buffer)?,
        ticket: deps.api.addr_validate(&msg.ticket)?,
        prize_denom: msg.prize_denom,
        claim_history_capacity,
        max_draws_per_claim,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "prize-distributor")
        .add_attribute("prize_denom", config.prize_denom)
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
        ExecuteMsg::Claim {
            user,
            draw_ids,
            picks,
        } => execute::claim(deps, env, info, user, draw_ids, picks),
        ExecuteMsg::Withdraw { recipient, amount } => {
            execute::withdraw(deps, env, info, recipient, amount)
        }
        ExecuteMsg::UpdateConfig {
            admin,
            draw_buffer,
            prize_config_buffer,
            ticket,
            max_draws_per_claim,
        } => execute::update_config(
            deps,
            env,
            info,
            UpdateConfigParams {
                admin,
                draw_buffer,
                prize_config_buffer,
                ticket,
                max_draws_per_claim,
            },
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::DrawPayout { address, draw_id } => {
            query::query_draw_payout(deps, address, draw_id)
        }
        QueryMsg::ClaimHistory { address } => query::query_claim_history(deps, address),
        QueryMsg::CalculatePrizes {
            user,
            draw_ids,
            picks,
        } => query::query_calculate_prizes(deps, user, draw_ids, picks),
        QueryMsg::NormalizedBalances { user, draw_ids } => {
            query::query_normalized_balances(deps, user, draw_ids)
        }
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
