use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::types::{PrizeConfig, DISTRIBUTION_PRECISION};

/// 1e18 scale used for normalized balances.
pub const NORMALIZATION_SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    #[error("claimed {count} picks, max per user is {max}")]
    ExceedsMaxPicks { count: usize, max: u32 },

    #[error("pick {pick} is outside the {allotted} picks allotted")]
    InsufficientPicks { pick: u64, allotted: u64 },

    #[error("picks must be strictly ascending: {previous} then {pick}")]
    PicksNotAscending { previous: u64, pick: u64 },

    #[error("prize amount overflow")]
    Overflow,
}

#[cw_serde]
pub struct PrizeCalculation {
    pub payout: Uint128,
    /// Winning picks per tier, indexed like `PrizeConfig::distributions`.
    pub tier_counts: Vec<u32>,
}

/// Per-user seed every pick random is derived from.
pub fn user_seed(address: &str) -> [u8; 32] {
    Sha256::digest(address.as_bytes()).into()
}

/// `sha256(seed || pick_be)` read as a big-endian 256-bit integer.
pub fn pick_random(seed: &[u8; 32], pick: u64) -> Uint256 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(pick.to_be_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    Uint256::from_be_bytes(digest)
}

/// User share of total supply scaled by 1e18; zero when nothing is staked.
pub fn normalized_balance(average_balance: Uint128, average_total_supply: Uint128) -> Uint256 {
    if average_total_supply.is_zero() {
        return Uint256::zero();
    }
    Uint256::from(average_balance) * Uint256::from(NORMALIZATION_SCALE)
        / Uint256::from(average_total_supply)
}

pub fn user_pick_allotment(normalized_balance: Uint256, number_of_picks: u64) -> u64 {
    let picks =
        normalized_balance * Uint256::from(number_of_picks) / Uint256::from(NORMALIZATION_SCALE);
    u64::try_from(Uint128::try_from(picks).unwrap_or(Uint128::MAX).u128()).unwrap_or(u64::MAX)
}

/// `match_cardinality` adjacent windows of `bit_range_size` bits, lowest first.
pub fn create_bitmasks(config: &PrizeConfig) -> Vec<Uint256> {
    let bits = u32::from(config.bit_range_size);
    let first = if bits >= 256 {
        Uint256::MAX
    } else {
        (Uint256::one() << bits) - Uint256::one()
    };

    let mut masks = Vec::with_capacity(usize::from(config.match_cardinality));
    let mut mask = first;
    for _ in 0..config.match_cardinality {
        masks.push(mask);
        mask = mask.checked_shl(bits).unwrap_or_else(|_| Uint256::zero());
    }
    masks
}

fn and(a: Uint256, b: Uint256) -> Uint256 {
    let (a, b) = (a.to_be_bytes(), b.to_be_bytes());
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a[i] & b[i];
    }
    Uint256::from_be_bytes(out)
}

/// `match_cardinality - matches`, where matches counts consecutive windows
/// from the lowest bits up that agree with the winning number.
pub fn tier_index(random: Uint256, winning: Uint256, masks: &[Uint256]) -> usize {
    let matches = masks
        .iter()
        .take_while(|mask| and(random, **mask) == and(winning, **mask))
        .count();
    masks.len() - matches
}

/// Distinct winning combinations sharing a tier.
pub fn prizes_at_tier(bit_range_size: u8, tier: usize) -> Uint256 {
    if tier == 0 {
        return Uint256::one();
    }
    let bits = u32::from(bit_range_size);
    let upper = pow2(bits * tier as u32);
    let lower = pow2(bits * (tier as u32 - 1));
    upper - lower
}

fn pow2(exp: u32) -> Uint256 {
    Uint256::one()
        .checked_shl(exp)
        .unwrap_or_else(|_| Uint256::zero())
}

/// Scores `picks` for one draw and returns the payout. Pure: the result only
/// depends on the arguments.
pub fn calculate_prize(
    winning_random_number: Uint256,
    config: &PrizeConfig,
    total_user_picks: u64,
    seed: &[u8; 32],
    picks: &[u64],
) -> Result<PrizeCalculation, CalculatorError> {
    if picks.len() > config.max_picks_per_user as usize {
        return Err(CalculatorError::ExceedsMaxPicks {
            count: picks.len(),
            max: config.max_picks_per_user,
        });
    }

    let masks = create_bitmasks(config);
    let mut tier_counts = vec![0u32; config.distributions.len()];

    for (i, pick) in picks.iter().enumerate() {
        if *pick >= total_user_picks {
            return Err(CalculatorError::InsufficientPicks {
                pick: *pick,
                allotted: total_user_picks,
            });
        }
        if i > 0 && picks[i - 1] >= *pick {
            return Err(CalculatorError::PicksNotAscending {
                previous: picks[i - 1],
                pick: *pick,
            });
        }

        let tier = tier_index(pick_random(seed, *pick), winning_random_number, &masks);
        // no matching window at all is never a winning tier
        if tier >= masks.len() {
            continue;
        }
        if config.distributions.get(tier).is_some_and(|d| *d > 0) {
            tier_counts[tier] += 1;
        }
    }

    let payout = payout_for_counts(config, &tier_counts)?;
    Ok(PrizeCalculation {
        payout,
        tier_counts,
    })
}

/// `Σ distributions[t] / prizes_at_tier(t) * count[t] * prize / 1e9`.
pub fn payout_for_counts(
    config: &PrizeConfig,
    tier_counts: &[u32],
) -> Result<Uint128, CalculatorError> {
    let mut total_fraction = Uint256::zero();
    let tiers = usize::from(config.match_cardinality);
    for (tier, count) in tier_counts.iter().enumerate().take(tiers) {
        if *count == 0 {
            continue;
        }
        let distribution = config.distributions.get(tier).copied().unwrap_or(0);
        let fraction = Uint256::from(distribution) / prizes_at_tier(config.bit_range_size, tier);
        total_fraction = total_fraction
            .checked_add(fraction * Uint256::from(*count))
            .map_err(|_| CalculatorError::Overflow)?;
    }

    let payout = total_fraction
        .checked_mul(Uint256::from(config.prize))
        .map_err(|_| CalculatorError::Overflow)?
        / Uint256::from(DISTRIBUTION_PRECISION);
    Uint128::try_from(payout).map_err(|_| CalculatorError::Overflow)
}
