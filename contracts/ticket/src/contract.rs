use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};
use lucky_vault_common::twab::{DEFAULT_ACCOUNT_CAPACITY, DEFAULT_SUPPLY_CAPACITY};
use lucky_vault_common::TwabAccount;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{TicketConfig, CONFIG, TOTAL_SUPPLY};

const CONTRACT_NAME: &str = "crates.io:lucky-ticket";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let account_twab_capacity = msg
        .account_twab_capacity
        .unwrap_or(DEFAULT_ACCOUNT_CAPACITY);
    let supply_twab_capacity = msg.supply_twab_capacity.unwrap_or(DEFAULT_SUPPLY_CAPACITY);

    // both rings are rejected up front if empty
    TwabAccount::new(account_twab_capacity)?;
    let supply = TwabAccount::new(supply_twab_capacity)?;

    let config = TicketConfig {
        admin: info.sender.clone(),
        controller: deps.api.addr_validate(&msg.controller)?,
        account_twab_capacity,
        supply_twab_capacity,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_SUPPLY.save(deps.storage, &supply)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "ticket")
        .add_attribute("controller", config.controller.to_string())
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
        ExecuteMsg::Mint { recipient, amount } => execute::mint(deps, env, info, recipient, amount),
        ExecuteMsg::Burn { owner, amount } => execute::burn(deps, env, info, owner, amount),
        ExecuteMsg::Transfer { recipient, amount } => {
            execute::transfer(deps, env, info, recipient, amount)
        }
        ExecuteMsg::UpdateConfig { admin, controller } => {
            execute::update_config(deps, env, info, admin, controller)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Balance { address } => query::query_balance(deps, address),
        QueryMsg::TotalSupply {} => query::query_total_supply(deps),
        QueryMsg::AccountDetails { address } => query::query_account_details(deps, address),
        QueryMsg::BalanceAt { address, timestamp } => {
            query::query_balance_at(deps, address, timestamp)
        }
        QueryMsg::TotalSupplyAt { timestamp } => query::query_total_supply_at(deps, timestamp),
        QueryMsg::AverageBalanceBetween {
            address,
            start,
            end,
        } => query::query_average_balance_between(deps, env, address, start, end),
        QueryMsg::AverageBalancesBetween { address, windows } => {
            query::query_average_balances_between(deps, env, address, windows)
        }
        QueryMsg::AverageTotalSuppliesBetween { windows } => {
            query::query_average_total_supplies_between(deps, env, windows)
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
