use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use lucky_vault_common::{AccountDetails, TimeWindow};

use crate::state::TicketConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub controller: String,
    pub account_twab_capacity: Option<u32>,
    pub supply_twab_capacity: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint tickets to `recipient`. Controller only.
    Mint { recipient: String, amount: Uint128 },
    /// Burn tickets held by `owner`. Controller only.
    Burn { owner: String, amount: Uint128 },
    /// Move tickets from the sender to `recipient`.
    Transfer { recipient: String, amount: Uint128 },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        controller: Option<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(TicketConfig)]
    Config {},
    #[returns(Uint128)]
    Balance { address: String },
    #[returns(Uint128)]
    TotalSupply {},
    #[returns(AccountDetails)]
    AccountDetails { address: String },
    #[returns(Uint128)]
    BalanceAt { address: String, timestamp: u64 },
    #[returns(Uint128)]
    TotalSupplyAt { timestamp: u64 },
    #[returns(Uint128)]
    AverageBalanceBetween {
        address: String,
        start: u64,
        end: u64,
    },
    /// One average per window, in request order.
    #[returns(Vec<Uint128>)]
    AverageBalancesBetween {
        address: String,
        windows: Vec<TimeWindow>,
    },
    #[returns(Vec<Uint128>)]
    AverageTotalSuppliesBetween { windows: Vec<TimeWindow> },
}
