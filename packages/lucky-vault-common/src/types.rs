use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};
use thiserror::Error;

/// Fixed-point scale of tier distributions: 1e9 == 100%.
pub const DISTRIBUTION_PRECISION: u32 = 1_000_000_000;

/// Maximum number of configured tiers.
pub const MAX_TIERS: usize = 16;

/// Upper bound for `max_picks_per_user`; caps the per-draw pick loop.
pub const MAX_PICKS_PER_USER: u32 = 1_000;

/// Upper bound on ids / windows accepted by a single batch query.
pub const MAX_BATCH_SIZE: usize = 100;

/// A published winning random number for one beacon period.
#[cw_serde]
pub struct Draw {
    pub draw_id: u64,
    pub winning_random_number: Uint256,
    /// Unix seconds at which the draw completed.
    pub timestamp: u64,
    pub beacon_period_started_at: u64,
    pub beacon_period_seconds: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum DrawError {
    #[error("draw {draw_id} has a zero timestamp")]
    ZeroTimestamp { draw_id: u64 },
}

impl Draw {
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.timestamp == 0 {
            return Err(DrawError::ZeroTimestamp {
                draw_id: self.draw_id,
            });
        }
        Ok(())
    }

    /// Balance window the prize config applies to this draw.
    pub fn balance_window(&self, config: &PrizeConfig) -> TimeWindow {
        TimeWindow {
            start: self.timestamp.saturating_sub(config.start_offset),
            end: self.timestamp.saturating_sub(config.end_offset),
        }
    }
}

/// Parameters governing how a draw's picks are matched and paid.
#[cw_serde]
pub struct PrizeConfig {
    /// Number of bit windows matched against the winning number.
    pub match_cardinality: u8,
    /// Width in bits of each window.
    pub bit_range_size: u8,
    /// Fraction of `prize` per tier, scaled by `DISTRIBUTION_PRECISION`.
    pub distributions: Vec<u32>,
    pub max_picks_per_user: u32,
    /// Picks a holder of the whole supply would be allotted.
    pub number_of_picks: u64,
    pub prize: Uint128,
    /// Seconds before the draw timestamp at which the balance window opens.
    pub start_offset: u64,
    /// Seconds before the draw timestamp at which the balance window closes.
    pub end_offset: u64,
}

#[derive(Error, Debug, PartialEq)]
pub enum PrizeConfigError {
    #[error("match cardinality must be at least 1")]
    ZeroMatchCardinality,

    #[error("bit range size must be at least 1")]
    ZeroBitRangeSize,

    #[error("bit range {bit_range_size} x cardinality {match_cardinality} exceeds 256 bits")]
    BitRangeOverflow {
        bit_range_size: u8,
        match_cardinality: u8,
    },

    #[error("distributions sum to {total}, above 1e9")]
    DistributionsOverflow { total: u64 },

    #[error("{count} tiers configured, max is {max}")]
    TooManyTiers { count: usize, max: usize },

    #[error("{non_zero} non-zero tiers exceed match cardinality {match_cardinality}")]
    TooManyNonZeroTiers { non_zero: usize, match_cardinality: u8 },

    #[error("max picks per user must be within [1, {max}], got {value}")]
    InvalidMaxPicks { value: u32, max: u32 },

    #[error("start offset {start_offset} must be greater than end offset {end_offset}")]
    InvalidWindow { start_offset: u64, end_offset: u64 },
}

impl PrizeConfig {
    pub fn validate(&self) -> Result<(), PrizeConfigError> {
        if self.match_cardinality == 0 {
            return Err(PrizeConfigError::ZeroMatchCardinality);
        }
        if self.bit_range_size == 0 {
            return Err(PrizeConfigError::ZeroBitRangeSize);
        }
        if u32::from(self.bit_range_size) * u32::from(self.match_cardinality) > 256 {
            return Err(PrizeConfigError::BitRangeOverflow {
                bit_range_size: self.bit_range_size,
                match_cardinality: self.match_cardinality,
            });
        }
        if self.distributions.len() > MAX_TIERS {
            return Err(PrizeConfigError::TooManyTiers {
                count: self.distributions.len(),
                max: MAX_TIERS,
            });
        }

        let total: u64 = self.distributions.iter().map(|d| u64::from(*d)).sum();
        if total > u64::from(DISTRIBUTION_PRECISION) {
            return Err(PrizeConfigError::DistributionsOverflow { total });
        }

        let non_zero = self.distributions.iter().filter(|d| **d > 0).count();
        if non_zero > usize::from(self.match_cardinality) {
            return Err(PrizeConfigError::TooManyNonZeroTiers {
                non_zero,
                match_cardinality: self.match_cardinality,
            });
        }

        if self.max_picks_per_user == 0 || self.max_picks_per_user > MAX_PICKS_PER_USER {
            return Err(PrizeConfigError::InvalidMaxPicks {
                value: self.max_picks_per_user,
                max: MAX_PICKS_PER_USER,
            });
        }

        if self.start_offset <= self.end_offset {
            return Err(PrizeConfigError::InvalidWindow {
                start_offset: self.start_offset,
                end_offset: self.end_offset,
            });
        }

        Ok(())
    }
}

/// Half-open balance averaging window, unix seconds.
#[cw_serde]
#[derive(Copy)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}
