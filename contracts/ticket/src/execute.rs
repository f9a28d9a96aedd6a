use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{load_account, TicketConfig, ACCOUNTS, CONFIG, TOTAL_SUPPLY};

fn ensure_controller(config: &TicketConfig, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.controller {
        return Err(ContractError::Unauthorized {
            reason: "only controller can mint or burn".to_string(),
        });
    }
    Ok(())
}

/// Mint tickets. Checkpoints the recipient and the total supply.
pub fn mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_controller(&config, &info)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let now = env.block.time.seconds();

    let mut account = load_account(deps.storage, &config, &recipient)?;
    account.increase_balance(amount, now)?;
    let mut supply = TOTAL_SUPPLY.load(deps.storage)?;
    supply.increase_balance(amount, now)?;

    ACCOUNTS.save(deps.storage, &recipient, &account)?;
    TOTAL_SUPPLY.save(deps.storage, &supply)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("lucky_ticket_minted")
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("balance", account.balance().to_string())
                .add_attribute("total_supply", supply.balance().to_string())
                .add_attribute("timestamp", now.to_string()),
        ))
}

/// Burn tickets. Checkpoints the owner and the total supply.
pub fn burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_controller(&config, &info)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let owner = deps.api.addr_validate(&owner)?;
    let now = env.block.time.seconds();

    let mut account = load_account(deps.storage, &config, &owner)?;
    account.decrease_balance(amount, now)?;
    let mut supply = TOTAL_SUPPLY.load(deps.storage)?;
    supply.decrease_balance(amount, now)?;

    ACCOUNTS.save(deps.storage, &owner, &account)?;
    TOTAL_SUPPLY.save(deps.storage, &supply)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("owner", owner.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("lucky_ticket_burned")
                .add_attribute("owner", owner.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("balance", account.balance().to_string())
                .add_attribute("total_supply", supply.balance().to_string())
                .add_attribute("timestamp", now.to_string()),
        ))
}

/// Move tickets between holders. Total supply is unchanged.
pub fn transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let config = CONFIG.load(deps.storage)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let sender = info.sender;
    let now = env.block.time.seconds();

    let mut from = load_account(deps.storage, &config, &sender)?;
    from.decrease_balance(amount, now)?;

    if recipient == sender {
        from.increase_balance(amount, now)?;
        ACCOUNTS.save(deps.storage, &sender, &from)?;
    } else {
        let mut to = load_account(deps.storage, &config, &recipient)?;
        to.increase_balance(amount, now)?;
        ACCOUNTS.save(deps.storage, &sender, &from)?;
        ACCOUNTS.save(deps.storage, &recipient, &to)?;
    }

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("sender", sender.to_string())
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("lucky_ticket_transferred")
                .add_attribute("sender", sender.to_string())
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("timestamp", now.to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    controller: Option<String>,
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
    if let Some(controller) = controller {
        config.controller = deps.api.addr_validate(&controller)?;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("admin", config.admin.to_string())
        .add_attribute("controller", config.controller.to_string()))
}
