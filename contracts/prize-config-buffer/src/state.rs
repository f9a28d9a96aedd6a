use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use lucky_vault_common::{PrizeConfig, RingBufferHistory};

pub const CONFIG: Item<PrizeConfigBufferConfig> = Item::new("config");

/// Entries are addressed by an internal sequence number; the draw id they
/// take effect from is stored alongside and strictly increases.
pub const PRIZE_CONFIGS: RingBufferHistory<PrizeConfigEntry> =
    RingBufferHistory::new("prize_config_ring", "prize_configs");

pub const DEFAULT_CAPACITY: u32 = 256;

/// How a draw id resolves to a prize config.
#[cw_serde]
#[derive(Copy)]
pub enum ConfigLookup {
    /// One config per draw, pushed contiguously alongside the draws.
    Exact,
    /// The newest config pushed for a draw id at or before the requested one.
    LatestAtOrBefore,
}

#[cw_serde]
pub struct PrizeConfigBufferConfig {
    pub admin: Addr,
    pub manager: Addr,
    pub lookup: ConfigLookup,
}

#[cw_serde]
pub struct PrizeConfigEntry {
    pub draw_id: u64,
    pub prize_config: PrizeConfig,
}
