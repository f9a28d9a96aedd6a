use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use crate::ledger::ClaimLedger;

pub const CONFIG: Item<DistributorConfig> = Item::new("config");

/// Per-user record of what has been paid for recent draws.
pub const CLAIM_LEDGERS: Map<&Addr, ClaimLedger> = Map::new("claim_ledgers");

pub const DEFAULT_CLAIM_HISTORY_CAPACITY: u32 = 8;
pub const DEFAULT_MAX_DRAWS_PER_CLAIM: u32 = 8;

#[cw_serde]
pub struct DistributorConfig {
    pub admin: Addr,
    pub draw_buffer: Addr,
    pub prize_config_buffer: Addr,
    pub ticket: Addr,
    /// Native denom prizes are paid in.
    pub prize_denom: String,
    /// Slots per user ledger. Fixed at instantiation; also the width of the
    /// claimable draw window.
    pub claim_history_capacity: u32,
    pub max_draws_per_claim: u32,
}
