use cosmwasm_std::StdError;
use lucky_vault_common::types::PrizeConfigError;
use lucky_vault_common::RingBufferError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    RingBuffer(#[from] RingBufferError),

    #[error("invalid prize config: {0}")]
    InvalidPrizeConfig(#[from] PrizeConfigError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("draw id {got} must be greater than newest configured draw {newest}")]
    DrawIdNotIncreasing { newest: u64, got: u64 },
}
