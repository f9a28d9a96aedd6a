use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use lucky_vault_common::Draw;

use crate::error::ContractError;
use crate::state::{CONFIG, DRAWS};

/// Push the next draw. Only the manager can call this.
/// The draw id must directly follow the newest stored draw.
pub fn push_draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    draw: Draw,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.manager {
        return Err(ContractError::Unauthorized {
            reason: "only manager can push draws".to_string(),
        });
    }

    draw.validate()?;
    let state = DRAWS.push(deps.storage, draw.draw_id, &draw)?;

    Ok(Response::new()
        .add_attribute("action", "push_draw")
        .add_attribute("draw_id", draw.draw_id.to_string())
        .add_event(
            Event::new("lucky_draw_pushed")
                .add_attribute("draw_id", draw.draw_id.to_string())
                .add_attribute(
                    "winning_random_number",
                    draw.winning_random_number.to_string(),
                )
                .add_attribute("draw_timestamp", draw.timestamp.to_string())
                .add_attribute("slot", state.slot(draw.draw_id).to_string())
                .add_attribute("cardinality", state.cardinality.to_string())
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
        .add_attribute("manager", config.manager.to_string()))
}
