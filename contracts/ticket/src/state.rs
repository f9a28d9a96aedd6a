use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};
use lucky_vault_common::TwabAccount;

use crate::error::ContractError;

pub const CONFIG: Item<TicketConfig> = Item::new("config");

/// Balance and checkpoint ring per holder.
pub const ACCOUNTS: Map<&Addr, TwabAccount> = Map::new("accounts");

/// Aggregate supply, tracked with the same accumulator as a holder.
pub const TOTAL_SUPPLY: Item<TwabAccount> = Item::new("total_supply");

#[cw_serde]
pub struct TicketConfig {
    pub admin: Addr,
    /// Only address allowed to mint and burn.
    pub controller: Addr,
    pub account_twab_capacity: u32,
    pub supply_twab_capacity: u32,
}

/// Loads a holder's account, or a blank one if it never held tickets.
pub fn load_account(
    store: &dyn Storage,
    config: &TicketConfig,
    addr: &Addr,
) -> Result<TwabAccount, ContractError> {
    match ACCOUNTS.may_load(store, addr)? {
        Some(account) => Ok(account),
        None => Ok(TwabAccount::new(config.account_twab_capacity)?),
    }
}

pub fn may_load_account(store: &dyn Storage, addr: &Addr) -> StdResult<Option<TwabAccount>> {
    ACCOUNTS.may_load(store, addr)
}
