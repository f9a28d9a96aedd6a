use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use lucky_vault_common::{Draw, RingBufferHistory};

pub const CONFIG: Item<DrawBufferConfig> = Item::new("config");
pub const DRAWS: RingBufferHistory<Draw> = RingBufferHistory::new("draw_ring", "draws");

/// Default number of draws retained before the oldest is overwritten.
pub const DEFAULT_CAPACITY: u32 = 256;

#[cw_serde]
pub struct DrawBufferConfig {
    pub admin: Addr,
    /// Only the manager may push draws (the randomness beacon driver).
    pub manager: Addr,
}
