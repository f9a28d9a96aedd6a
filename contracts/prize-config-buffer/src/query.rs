use cosmwasm_std::{to_json_binary, Binary, Deps, StdError, StdResult};
use lucky_vault_common::types::MAX_BATCH_SIZE;

use crate::lookup;
use crate::state::{CONFIG, PRIZE_CONFIGS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_prize_config(deps: Deps, draw_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let entry = lookup::resolve(deps.storage, config.lookup, draw_id)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&entry.prize_config)
}

pub fn query_prize_configs(deps: Deps, draw_ids: Vec<u64>) -> StdResult<Binary> {
    if draw_ids.len() > MAX_BATCH_SIZE {
        return Err(StdError::generic_err(format!(
            "at most {} prize configs per query",
            MAX_BATCH_SIZE
        )));
    }
    let config = CONFIG.load(deps.storage)?;
    let configs = lookup::resolve_batch(deps.storage, config.lookup, &draw_ids)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&configs)
}

pub fn query_newest_prize_config(deps: Deps) -> StdResult<Binary> {
    let newest = PRIZE_CONFIGS
        .newest(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&newest.map(|(_, entry)| entry))
}

pub fn query_oldest_prize_config(deps: Deps) -> StdResult<Binary> {
    let oldest = PRIZE_CONFIGS
        .oldest(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&oldest.map(|(_, entry)| entry))
}

pub fn query_buffer_state(deps: Deps) -> StdResult<Binary> {
    let state = PRIZE_CONFIGS
        .state(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&state)
}
