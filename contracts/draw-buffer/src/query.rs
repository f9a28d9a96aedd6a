use cosmwasm_std::{to_json_binary, Binary, Deps, StdError, StdResult};
use lucky_vault_common::types::MAX_BATCH_SIZE;

use crate::state::{CONFIG, DRAWS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_draw(deps: Deps, draw_id: u64) -> StdResult<Binary> {
    let draw = DRAWS
        .get(deps.storage, draw_id)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&draw)
}

pub fn query_draws(deps: Deps, draw_ids: Vec<u64>) -> StdResult<Binary> {
    if draw_ids.len() > MAX_BATCH_SIZE {
        return Err(StdError::generic_err(format!(
            "at most {} draws per query",
            MAX_BATCH_SIZE
        )));
    }
    let draws = DRAWS
        .get_batch(deps.storage, &draw_ids)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&draws)
}

pub fn query_newest_draw(deps: Deps) -> StdResult<Binary> {
    let newest = DRAWS
        .newest(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&newest.map(|(_, draw)| draw))
}

pub fn query_oldest_draw(deps: Deps) -> StdResult<Binary> {
    let oldest = DRAWS
        .oldest(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&oldest.map(|(_, draw)| draw))
}

pub fn query_buffer_state(deps: Deps) -> StdResult<Binary> {
    let state = DRAWS
        .state(deps.storage)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&state)
}
