use cosmwasm_std::{
    coins, BankMsg, DepsMut, Env, Event, MessageInfo, Response, StdError, Uint128,
};
use lucky_vault_common::calculator::user_seed;
use lucky_vault_common::types::MAX_BATCH_SIZE;

use crate::claim::{check_request, compute_prizes};
use crate::error::ContractError;
use crate::ledger::{check_claim_window, ClaimLedger};
use crate::msg::UpdateConfigParams;
use crate::sources::{ContractSources, DrawSource};
use crate::state::{CLAIM_LEDGERS, CONFIG};

/// Claim prizes on behalf of `user`.
///
/// Each draw's full payout is recomputed from the sources and compared with
/// what the ledger already recorded; only the difference is sent. Repeating a
/// claim therefore pays nothing.
pub fn claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    user: String,
    draw_ids: Vec<u64>,
    picks: Vec<Vec<u64>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    check_request(&config, &draw_ids, &picks)?;
    let user = deps.api.addr_validate(&user)?;

    let sources = ContractSources::new(deps.querier, &config);
    let newest = sources.newest_draw()?.ok_or(ContractError::NoDraws)?;
    check_claim_window(&draw_ids, newest.draw_id, config.claim_history_capacity)?;

    let prizes = compute_prizes(&sources, &user, &draw_ids, &picks)?;

    let mut ledger = CLAIM_LEDGERS
        .may_load(deps.storage, &user)?
        .unwrap_or_else(|| ClaimLedger::new(config.claim_history_capacity));
    let mut total = Uint128::zero();
    let mut payouts = Vec::with_capacity(prizes.len());
    for prize in &prizes {
        let delta = ledger.record(prize.draw_id, prize.payout)?;
        total = total.checked_add(delta).map_err(StdError::from)?;
        payouts.push(format!("{}:{}", prize.draw_id, delta));
    }
    CLAIM_LEDGERS.save(deps.storage, &user, &ledger)?;

    let mut response = Response::new()
        .add_attribute("action", "claim")
        .add_attribute("user", user.to_string())
        .add_attribute("total_payout", total.to_string());

    if !total.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: user.to_string(),
            amount: coins(total.u128(), &config.prize_denom),
        });
    }

    Ok(response.add_event(
        Event::new("lucky_prizes_claimed")
            .add_attribute("user", user.to_string())
            .add_attribute("claimer", info.sender.to_string())
            .add_attribute("user_seed", hex::encode(user_seed(user.as_str())))
            .add_attribute("payouts", payouts.join(","))
            .add_attribute("total_payout", total.to_string())
            .add_attribute("timestamp", env.block.time.seconds().to_string()),
    ))
}

/// Send prize liquidity to `recipient`. Admin only.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can withdraw".to_string(),
        });
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(amount.u128(), &config.prize_denom),
        })
        .add_attribute("action", "withdraw")
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("lucky_prize_liquidity_withdrawn")
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

pub fn validate_max_draws_per_claim(value: u32) -> Result<u32, ContractError> {
    if value == 0 || value as usize > MAX_BATCH_SIZE {
        return Err(ContractError::InvalidConfig {
            reason: format!("max_draws_per_claim must be within [1, {}]", MAX_BATCH_SIZE),
        });
    }
    Ok(value)
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        admin,
        draw_buffer,
        prize_config_buffer,
        ticket,
        max_draws_per_claim,
    } = params;
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(draw_buffer) = draw_buffer {
        config.draw_buffer = deps.api.addr_validate(&draw_buffer)?;
    }
    if let Some(prize_config_buffer) = prize_config_buffer {
        config.prize_config_buffer = deps.api.addr_validate(&prize_config_buffer)?;
    }
    if let Some(ticket) = ticket {
        config.ticket = deps.api.addr_validate(&ticket)?;
    }
    if let Some(max) = max_draws_per_claim {
        config.max_draws_per_claim = validate_max_draws_per_claim(max)?;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("admin", config.admin.to_string())
        .add_attribute("max_draws_per_claim", config.max_draws_per_claim.to_string()))
}
