use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdError, StdResult, Uint128};
use lucky_vault_common::types::MAX_BATCH_SIZE;
use lucky_vault_common::{AccountDetails, TimeWindow};

use crate::state::{may_load_account, CONFIG, TOTAL_SUPPLY};

fn check_batch(windows: &[TimeWindow]) -> StdResult<()> {
    if windows.len() > MAX_BATCH_SIZE {
        return Err(StdError::generic_err(format!(
            "at most {} windows per query",
            MAX_BATCH_SIZE
        )));
    }
    Ok(())
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let balance = may_load_account(deps.storage, &addr)?
        .map(|account| account.balance())
        .unwrap_or_default();
    to_json_binary(&balance)
}

pub fn query_total_supply(deps: Deps) -> StdResult<Binary> {
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    to_json_binary(&supply.balance())
}

pub fn query_account_details(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let details = may_load_account(deps.storage, &addr)?
        .map(|account| account.details)
        .unwrap_or_default();
    to_json_binary::<AccountDetails>(&details)
}

pub fn query_balance_at(deps: Deps, address: String, timestamp: u64) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let balance = may_load_account(deps.storage, &addr)?
        .map(|account| account.balance_at(timestamp))
        .unwrap_or_default();
    to_json_binary(&balance)
}

pub fn query_total_supply_at(deps: Deps, timestamp: u64) -> StdResult<Binary> {
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    to_json_binary(&supply.balance_at(timestamp))
}

pub fn query_average_balance_between(
    deps: Deps,
    env: Env,
    address: String,
    start: u64,
    end: u64,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let now = env.block.time.seconds();
    let average = may_load_account(deps.storage, &addr)?
        .map(|account| account.average_balance_between(start, end, now))
        .unwrap_or_default();
    to_json_binary(&average)
}

pub fn query_average_balances_between(
    deps: Deps,
    env: Env,
    address: String,
    windows: Vec<TimeWindow>,
) -> StdResult<Binary> {
    check_batch(&windows)?;
    let addr = deps.api.addr_validate(&address)?;
    let now = env.block.time.seconds();
    let averages: Vec<Uint128> = match may_load_account(deps.storage, &addr)? {
        Some(account) => windows
            .iter()
            .map(|w| account.average_balance_between(w.start, w.end, now))
            .collect(),
        None => vec![Uint128::zero(); windows.len()],
    };
    to_json_binary(&averages)
}

pub fn query_average_total_supplies_between(
    deps: Deps,
    env: Env,
    windows: Vec<TimeWindow>,
) -> StdResult<Binary> {
    check_batch(&windows)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    let now = env.block.time.seconds();
    let averages: Vec<Uint128> = windows
        .iter()
        .map(|w| supply.average_balance_between(w.start, w.end, now))
        .collect();
    to_json_binary(&averages)
}
