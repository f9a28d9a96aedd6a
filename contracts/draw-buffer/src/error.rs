use cosmwasm_std::StdError;
use lucky_vault_common::types::DrawError;
use lucky_vault_common::RingBufferError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    RingBuffer(#[from] RingBufferError),

    #[error("{0}")]
    InvalidDraw(#[from] DrawError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },
}
