use cosmwasm_schema::{cw_serde, QueryResponses};
use lucky_vault_common::{Draw, RingBufferState};

use crate::state::DrawBufferConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub manager: String,
    /// Ring capacity; defaults to 256.
    pub capacity: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Push the next sequential draw. Manager only.
    PushDraw { draw: Draw },
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
    #[returns(DrawBufferConfig)]
    Config {},
    #[returns(Draw)]
    Draw { draw_id: u64 },
    /// Draws in request order; fails if any id is outside the window.
    #[returns(Vec<Draw>)]
    Draws { draw_ids: Vec<u64> },
    #[returns(Option<Draw>)]
    NewestDraw {},
    #[returns(Option<Draw>)]
    OldestDraw {},
    #[returns(RingBufferState)]
    BufferState {},
}
