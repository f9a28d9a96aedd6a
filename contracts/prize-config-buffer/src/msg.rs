use cosmwasm_schema::{cw_serde, QueryResponses};
use lucky_vault_common::{PrizeConfig, RingBufferState};

use crate::state::{ConfigLookup, PrizeConfigBufferConfig, PrizeConfigEntry};

#[cw_serde]
pub struct InstantiateMsg {
    pub manager: String,
    pub capacity: Option<u32>,
    pub lookup: ConfigLookup,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Push the config for `draw_id`. Manager only.
    PushPrizeConfig {
        draw_id: u64,
        prize_config: PrizeConfig,
    },
    /// Overwrite the newest config. Admin only.
    ReplacePrizeConfig {
        draw_id: u64,
        prize_config: PrizeConfig,
    },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        manager: Option<String>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PrizeConfigBufferConfig)]
    Config {},
    #[returns(PrizeConfig)]
    PrizeConfig { draw_id: u64 },
    #[returns(Vec<PrizeConfig>)]
    PrizeConfigs { draw_ids: Vec<u64> },
    #[returns(Option<PrizeConfigEntry>)]
    NewestPrizeConfig {},
    #[returns(Option<PrizeConfigEntry>)]
    OldestPrizeConfig {},
    #[returns(RingBufferState)]
    BufferState {},
}
