//! Per-draw prize computation, independent of how draws, configs and
//! balances are fetched.

use cosmwasm_std::{Addr, Uint128, Uint256};
use lucky_vault_common::calculator::{
    calculate_prize, normalized_balance, user_pick_allotment, user_seed,
};
use lucky_vault_common::{Draw, PrizeConfig};

use crate::error::ContractError;
use crate::sources::{BalanceLedger, DrawSource, PrizeConfigSource};
use crate::state::DistributorConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawPrize {
    pub draw_id: u64,
    pub total_user_picks: u64,
    pub payout: Uint128,
    pub tier_counts: Vec<u32>,
}

/// Shape checks shared by claims and dry runs.
pub fn check_request(
    config: &DistributorConfig,
    draw_ids: &[u64],
    picks: &[Vec<u64>],
) -> Result<(), ContractError> {
    if draw_ids.is_empty() {
        return Err(ContractError::EmptyClaim);
    }
    if draw_ids.len() > config.max_draws_per_claim as usize {
        return Err(ContractError::TooManyDraws {
            count: draw_ids.len(),
            max: config.max_draws_per_claim,
        });
    }
    if picks.len() != draw_ids.len() {
        return Err(ContractError::PicksLengthMismatch {
            draws: draw_ids.len(),
            picks: picks.len(),
        });
    }
    Ok(())
}

fn ensure_len<T>(got: &[T], expected: usize) -> Result<(), ContractError> {
    if got.len() != expected {
        return Err(ContractError::SourceMismatch {
            expected,
            got: got.len(),
        });
    }
    Ok(())
}

fn load_draws<S>(sources: &S, draw_ids: &[u64]) -> Result<(Vec<Draw>, Vec<PrizeConfig>), ContractError>
where
    S: DrawSource + PrizeConfigSource,
{
    let draws = sources.draws(draw_ids)?;
    ensure_len(&draws, draw_ids.len())?;
    let configs = sources.prize_configs(draw_ids)?;
    ensure_len(&configs, draw_ids.len())?;
    Ok((draws, configs))
}

fn balance_shares<S>(
    sources: &S,
    user: &Addr,
    draws: &[Draw],
    configs: &[PrizeConfig],
) -> Result<Vec<Uint256>, ContractError>
where
    S: BalanceLedger,
{
    let windows: Vec<_> = draws
        .iter()
        .zip(configs)
        .map(|(draw, config)| draw.balance_window(config))
        .collect();
    let balances = sources.average_balances_between(user, &windows)?;
    ensure_len(&balances, windows.len())?;
    let supplies = sources.average_total_supplies_between(&windows)?;
    ensure_len(&supplies, windows.len())?;

    Ok(balances
        .iter()
        .zip(&supplies)
        .map(|(balance, supply)| normalized_balance(*balance, *supply))
        .collect())
}

/// The user's share of the average supply over each draw's balance window,
/// scaled by 1e18.
pub fn normalized_balances<S>(
    sources: &S,
    user: &Addr,
    draw_ids: &[u64],
) -> Result<Vec<Uint256>, ContractError>
where
    S: DrawSource + PrizeConfigSource + BalanceLedger,
{
    let (draws, configs) = load_draws(sources, draw_ids)?;
    balance_shares(sources, user, &draws, &configs)
}

/// Computes the full payout of every requested draw. Pure with respect to the
/// sources: the ledger is not consulted.
pub fn compute_prizes<S>(
    sources: &S,
    user: &Addr,
    draw_ids: &[u64],
    picks: &[Vec<u64>],
) -> Result<Vec<DrawPrize>, ContractError>
where
    S: DrawSource + PrizeConfigSource + BalanceLedger,
{
    let (draws, configs) = load_draws(sources, draw_ids)?;
    let shares = balance_shares(sources, user, &draws, &configs)?;
    let seed = user_seed(user.as_str());

    draws
        .iter()
        .zip(&configs)
        .zip(&shares)
        .zip(picks)
        .map(|(((draw, config), share), draw_picks)| -> Result<DrawPrize, ContractError> {
            let total_user_picks = user_pick_allotment(*share, config.number_of_picks);
            let result = calculate_prize(
                draw.winning_random_number,
                config,
                total_user_picks,
                &seed,
                draw_picks,
            )?;
            Ok(DrawPrize {
                draw_id: draw.draw_id,
                total_user_picks,
                payout: result.payout,
                tier_counts: result.tier_counts,
            })
        })
        .collect()
}
