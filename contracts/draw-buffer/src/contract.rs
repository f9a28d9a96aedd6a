use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{DrawBufferConfig, CONFIG, DEFAULT_CAPACITY, DRAWS};

const CONTRACT_NAME: &str = "crates.io:lucky-draw-buffer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = DrawBufferConfig {
        admin: info.sender.clone(),
        manager: deps.api.addr_validate(&msg.manager)?,
    };
    CONFIG.save(deps.storage, &config)?;

    let capacity = msg.capacity.unwrap_or(DEFAULT_CAPACITY);
    DRAWS.initialize(deps.storage, capacity)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "draw-buffer")
        .add_attribute("capacity", capacity.to_string())
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
        ExecuteMsg::PushDraw { draw } => execute::push_draw(deps, env, info, draw),
        ExecuteMsg::UpdateConfig { admin, manager } => {
            execute::update_config(deps, env, info, admin, manager)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Draw { draw_id } => query::query_draw(deps, draw_id),
        QueryMsg::Draws { draw_ids } => query::query_draws(deps, draw_ids),
        QueryMsg::NewestDraw {} => query::query_newest_draw(deps),
        QueryMsg::OldestDraw {} => query::query_oldest_draw(deps),
        QueryMsg::BufferState {} => query::query_buffer_state(deps),
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
