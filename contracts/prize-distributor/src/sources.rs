use cosmwasm_std::{to_json_binary, Addr, QuerierWrapper, QueryRequest, StdResult, Uint128, WasmQuery};
use lucky_vault_common::{Draw, PrizeConfig, TimeWindow};

use crate::msg::{DrawBufferQueryMsg, PrizeConfigBufferQueryMsg, TicketQueryMsg};
use crate::state::DistributorConfig;

pub trait DrawSource {
    fn newest_draw(&self) -> StdResult<Option<Draw>>;

    /// Draws in request order.
    fn draws(&self, draw_ids: &[u64]) -> StdResult<Vec<Draw>>;
}

pub trait PrizeConfigSource {
    /// Configs governing each draw, in request order.
    fn prize_configs(&self, draw_ids: &[u64]) -> StdResult<Vec<PrizeConfig>>;
}

pub trait BalanceLedger {
    fn average_balances_between(
        &self,
        user: &Addr,
        windows: &[TimeWindow],
    ) -> StdResult<Vec<Uint128>>;

    fn average_total_supplies_between(&self, windows: &[TimeWindow]) -> StdResult<Vec<Uint128>>;
}

/// Binds the collaborators to the configured contracts via smart queries.
pub struct ContractSources<'a> {
    querier: QuerierWrapper<'a>,
    config: &'a DistributorConfig,
}

impl<'a> ContractSources<'a> {
    pub fn new(querier: QuerierWrapper<'a>, config: &'a DistributorConfig) -> Self {
        Self { querier, config }
    }

    fn smart<T, M>(&self, contract: &Addr, msg: &M) -> StdResult<T>
    where
        T: serde::de::DeserializeOwned,
        M: serde::Serialize,
    {
        let request = QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: contract.to_string(),
            msg: to_json_binary(msg)?,
        });
        self.querier.query(&request)
    }
}

impl DrawSource for ContractSources<'_> {
    fn newest_draw(&self) -> StdResult<Option<Draw>> {
        self.smart(&self.config.draw_buffer, &DrawBufferQueryMsg::NewestDraw {})
    }

    fn draws(&self, draw_ids: &[u64]) -> StdResult<Vec<Draw>> {
        self.smart(
            &self.config.draw_buffer,
            &DrawBufferQueryMsg::Draws {
                draw_ids: draw_ids.to_vec(),
            },
        )
    }
}

impl PrizeConfigSource for ContractSources<'_> {
    fn prize_configs(&self, draw_ids: &[u64]) -> StdResult<Vec<PrizeConfig>> {
        self.smart(
            &self.config.prize_config_buffer,
            &PrizeConfigBufferQueryMsg::PrizeConfigs {
                draw_ids: draw_ids.to_vec(),
            },
        )
    }
}

impl BalanceLedger for ContractSources<'_> {
    fn average_balances_between(
        &self,
        user: &Addr,
        windows: &[TimeWindow],
    ) -> StdResult<Vec<Uint128>> {
        self.smart(
            &self.config.ticket,
            &TicketQueryMsg::AverageBalancesBetween {
                address: user.to_string(),
                windows: windows.to_vec(),
            },
        )
    }

    fn average_total_supplies_between(&self, windows: &[TimeWindow]) -> StdResult<Vec<Uint128>> {
        self.smart(
            &self.config.ticket,
            &TicketQueryMsg::AverageTotalSuppliesBetween {
                windows: windows.to_vec(),
            },
        )
    }
}
