use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use lucky_vault_common::PrizeConfig;

use crate::error::ContractError;
use crate::lookup;
use crate::state::CONFIG;

/// Push the prize config that takes effect at `draw_id`. Manager only.
pub fn push_prize_config(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    draw_id: u64,
    prize_config: PrizeConfig,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.manager {
        return Err(ContractError::Unauthorized {
            reason: "only manager can push prize configs".to_string(),
        });
    }

    let prize = prize_config.prize;
    let tiers = prize_config.distributions.len();
    let state = lookup::push_entry(deps.storage, config.lookup, draw_id, prize_config)?;

    Ok(Response::new()
        .add_attribute("action", "push_prize_config")
        .add_attribute("draw_id", draw_id.to_string())
        .add_event(
            Event::new("lucky_prize_config_pushed")
                .add_attribute("draw_id", draw_id.to_string())
                .add_attribute("prize", prize.to_string())
                .add_attribute("tiers", tiers.to_string())
                .add_attribute("cardinality", state.cardinality.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Overwrite the newest prize config. Admin only.
pub fn replace_prize_config(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    draw_id: u64,
    prize_config: PrizeConfig,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can replace prize configs".to_string(),
        });
    }

    let prize = prize_config.prize;
    lookup::replace_newest(deps.storage, draw_id, prize_config)?;

    Ok(Response::new()
        .add_attribute("action", "replace_prize_config")
        .add_attribute("draw_id", draw_id.to_string())
        .add_event(
            Event::new("lucky_prize_config_replaced")
                .add_attribute("draw_id", draw_id.to_string())
                .add_attribute("prize", prize.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    manager: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(manager) = manager {
        config.manager = deps.api.addr_validate(&manager)?;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("admin", config.admin.to_string())
        .add_attribute("manager", config.manager.to_string()))
}
