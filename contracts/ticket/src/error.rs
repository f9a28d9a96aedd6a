use cosmwasm_std::StdError;
use lucky_vault_common::twab::TwabError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Twab(#[from] TwabError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("amount must be greater than zero")]
    ZeroAmount,
}
