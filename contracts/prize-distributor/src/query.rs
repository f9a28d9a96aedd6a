use cosmwasm_std::{to_json_binary, Binary, Deps, StdError, StdResult, Uint128};

use crate::claim::{check_request, compute_prizes, normalized_balances};
use crate::error::ContractError;
use crate::msg::{CalculatePrizesResponse, DrawPrizeResponse};
use crate::sources::ContractSources;
use crate::state::{CLAIM_LEDGERS, CONFIG};

fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_draw_payout(deps: Deps, address: String, draw_id: u64) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let paid = CLAIM_LEDGERS
        .may_load(deps.storage, &addr)?
        .map(|ledger| ledger.paid(draw_id))
        .unwrap_or_default();
    to_json_binary(&paid)
}

pub fn query_claim_history(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let history = CLAIM_LEDGERS
        .may_load(deps.storage, &addr)?
        .map(|ledger| ledger.history())
        .unwrap_or_default();
    to_json_binary(&history)
}

pub fn query_calculate_prizes(
    deps: Deps,
    user: String,
    draw_ids: Vec<u64>,
    picks: Vec<Vec<u64>>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    check_request(&config, &draw_ids, &picks).map_err(to_std)?;
    let addr = deps.api.addr_validate(&user)?;

    let sources = ContractSources::new(deps.querier, &config);
    let prizes = compute_prizes(&sources, &addr, &draw_ids, &picks).map_err(to_std)?;
    let ledger = CLAIM_LEDGERS.may_load(deps.storage, &addr)?;

    let mut claimable = Uint128::zero();
    let draws: Vec<DrawPrizeResponse> = prizes
        .into_iter()
        .map(|prize| {
            let already_paid = ledger
                .as_ref()
                .map(|ledger| ledger.paid(prize.draw_id))
                .unwrap_or_default();
            claimable += prize.payout.saturating_sub(already_paid);
            DrawPrizeResponse {
                draw_id: prize.draw_id,
                total_user_picks: prize.total_user_picks,
                payout: prize.payout,
                already_paid,
                tier_counts: prize.tier_counts,
            }
        })
        .collect();

    to_json_binary(&CalculatePrizesResponse {
        user,
        draws,
        claimable,
    })
}

pub fn query_normalized_balances(deps: Deps, user: String, draw_ids: Vec<u64>) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    if draw_ids.len() > config.max_draws_per_claim as usize {
        return Err(StdError::generic_err(format!(
            "at most {} draws per query",
            config.max_draws_per_claim
        )));
    }
    let addr = deps.api.addr_validate(&user)?;
    let sources = ContractSources::new(deps.querier, &config);
    let shares = normalized_balances(&sources, &addr, &draw_ids).map_err(to_std)?;
    to_json_binary(&shares)
}
