use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};
use lucky_vault_common::TimeWindow;

use crate::ledger::ClaimRecord;
use crate::state::DistributorConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub draw_buffer: String,
    pub prize_config_buffer: String,
    pub ticket: String,
    pub prize_denom: String,
    pub claim_history_capacity: Option<u32>,
    pub max_draws_per_claim: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Claim prizes for `user` across `draw_ids`. Anyone can call; the payout
    /// always goes to `user`. `picks[i]` are the ascending pick indices for
    /// `draw_ids[i]`.
    Claim {
        user: String,
        draw_ids: Vec<u64>,
        picks: Vec<Vec<u64>>,
    },
    /// Send prize liquidity out of the contract. Admin only.
    Withdraw { recipient: String, amount: Uint128 },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        draw_buffer: Option<String>,
        prize_config_buffer: Option<String>,
        ticket: Option<String>,
        max_draws_per_claim: Option<u32>,
    },
}

/// Fields of `ExecuteMsg::UpdateConfig`; `None` keeps the current value.
pub struct UpdateConfigParams {
    pub admin: Option<String>,
    pub draw_buffer: Option<String>,
    pub prize_config_buffer: Option<String>,
    pub ticket: Option<String>,
    pub max_draws_per_claim: Option<u32>,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Query message for the draw buffer contract.
#[cw_serde]
pub enum DrawBufferQueryMsg {
    Draws { draw_ids: Vec<u64> },
    NewestDraw {},
}

/// Query message for the prize config buffer contract.
#[cw_serde]
pub enum PrizeConfigBufferQueryMsg {
    PrizeConfigs { draw_ids: Vec<u64> },
}

/// Query message for the ticket contract.
#[cw_serde]
pub enum TicketQueryMsg {
    AverageBalancesBetween {
        address: String,
        windows: Vec<TimeWindow>,
    },
    AverageTotalSuppliesBetween {
        windows: Vec<TimeWindow>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(DistributorConfig)]
    Config {},
    /// Amount recorded as paid to `address` for `draw_id`.
    #[returns(Uint128)]
    DrawPayout { address: String, draw_id: u64 },
    #[returns(Vec<ClaimRecord>)]
    ClaimHistory { address: String },
    /// Dry run of a claim; nothing is recorded.
    #[returns(CalculatePrizesResponse)]
    CalculatePrizes {
        user: String,
        draw_ids: Vec<u64>,
        picks: Vec<Vec<u64>>,
    },
    /// Balance share of `user` per draw, scaled by 1e18.
    #[returns(Vec<Uint256>)]
    NormalizedBalances { user: String, draw_ids: Vec<u64> },
}

#[cw_serde]
pub struct DrawPrizeResponse {
    pub draw_id: u64,
    pub total_user_picks: u64,
    pub payout: Uint128,
    pub already_paid: Uint128,
    pub tier_counts: Vec<u32>,
}

#[cw_serde]
pub struct CalculatePrizesResponse {
    pub user: String,
    pub draws: Vec<DrawPrizeResponse>,
    /// Sum of `payout - already_paid` over all draws.
    pub claimable: Uint128,
}
