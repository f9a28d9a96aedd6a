use cosmwasm_std::{StdError, Uint128};
use lucky_vault_common::calculator::CalculatorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Calculator(#[from] CalculatorError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("no draws have been pushed yet")]
    NoDraws,

    #[error("claim must include at least one draw")]
    EmptyClaim,

    #[error("{count} draws in one claim, max is {max}")]
    TooManyDraws { count: usize, max: u32 },

    #[error("{draws} draw ids but {picks} pick lists")]
    PicksLengthMismatch { draws: usize, picks: usize },

    #[error("draw {draw_id} is outside the claimable range [{oldest}, {newest}]")]
    DrawIdOutOfRange {
        draw_id: u64,
        oldest: u64,
        newest: u64,
    },

    #[error("draw {draw_id} payout {computed} is below the {paid} already paid")]
    PayoutBelowThreshold {
        draw_id: u64,
        computed: Uint128,
        paid: Uint128,
    },

    #[error("source returned {got} results for {expected} draws")]
    SourceMismatch { expected: usize, got: usize },

    #[error("amount must be greater than zero")]
    ZeroAmount,
}
