use cosmwasm_std::Storage;
use lucky_vault_common::{PrizeConfig, RingBufferError, RingBufferState};

use crate::error::ContractError;
use crate::state::{ConfigLookup, PrizeConfigEntry, PRIZE_CONFIGS};

/// Validates and appends a config taking effect at `draw_id`.
pub fn push_entry(
    store: &mut dyn Storage,
    lookup: ConfigLookup,
    draw_id: u64,
    prize_config: PrizeConfig,
) -> Result<RingBufferState, ContractError> {
    prize_config.validate()?;

    let sequence = match PRIZE_CONFIGS.newest(store)? {
        None => 0,
        Some((sequence, newest)) => {
            match lookup {
                ConfigLookup::Exact => {
                    let expected = newest.draw_id.saturating_add(1);
                    if draw_id != expected {
                        return Err(RingBufferError::NonSequentialId {
                            expected,
                            got: draw_id,
                        }
                        .into());
                    }
                }
                ConfigLookup::LatestAtOrBefore => {
                    if draw_id <= newest.draw_id {
                        return Err(ContractError::DrawIdNotIncreasing {
                            newest: newest.draw_id,
                            got: draw_id,
                        });
                    }
                }
            }
            sequence + 1
        }
    };

    let entry = PrizeConfigEntry {
        draw_id,
        prize_config,
    };
    Ok(PRIZE_CONFIGS.push(store, sequence, &entry)?)
}

/// Overwrites the newest entry, which must be the one for `draw_id`.
pub fn replace_newest(
    store: &mut dyn Storage,
    draw_id: u64,
    prize_config: PrizeConfig,
) -> Result<(), ContractError> {
    prize_config.validate()?;

    let (sequence, newest) = PRIZE_CONFIGS
        .newest(store)?
        .ok_or(RingBufferError::FutureId {
            id: draw_id,
            newest: None,
        })?;
    if newest.draw_id != draw_id {
        return Err(RingBufferError::NotNewest {
            id: draw_id,
            newest: newest.draw_id,
        }
        .into());
    }

    let entry = PrizeConfigEntry {
        draw_id,
        prize_config,
    };
    PRIZE_CONFIGS.replace(store, sequence, &entry)?;
    Ok(())
}

/// Resolves the config governing `draw_id`.
pub fn resolve(
    store: &dyn Storage,
    lookup: ConfigLookup,
    draw_id: u64,
) -> Result<PrizeConfigEntry, ContractError> {
    let state = PRIZE_CONFIGS.state(store)?;
    let (oldest_seq, newest_seq) = match (state.oldest_id(), state.newest_id()) {
        (Some(oldest), Some(newest)) => (oldest, newest),
        _ => {
            return Err(RingBufferError::FutureId {
                id: draw_id,
                newest: None,
            }
            .into())
        }
    };
    let newest = PRIZE_CONFIGS.get(store, newest_seq)?;

    match lookup {
        ConfigLookup::Exact => {
            if draw_id > newest.draw_id {
                return Err(RingBufferError::FutureId {
                    id: draw_id,
                    newest: Some(newest.draw_id),
                }
                .into());
            }
            let offset = newest.draw_id - draw_id;
            let retained = newest_seq - oldest_seq;
            if offset > retained {
                return Err(RingBufferError::Expired {
                    id: draw_id,
                    oldest: newest.draw_id - retained,
                }
                .into());
            }
            Ok(PRIZE_CONFIGS.get(store, newest_seq - offset)?)
        }
        ConfigLookup::LatestAtOrBefore => {
            if draw_id >= newest.draw_id {
                return Ok(newest);
            }
            let oldest = PRIZE_CONFIGS.get(store, oldest_seq)?;
            if draw_id < oldest.draw_id {
                return Err(RingBufferError::Expired {
                    id: draw_id,
                    oldest: oldest.draw_id,
                }
                .into());
            }

            // entry(low).draw_id <= draw_id < entry(high).draw_id
            let mut low = oldest_seq;
            let mut high = newest_seq;
            let mut found = oldest;
            while high - low > 1 {
                let mid = low + (high - low) / 2;
                let entry = PRIZE_CONFIGS.get(store, mid)?;
                if entry.draw_id <= draw_id {
                    low = mid;
                    found = entry;
                } else {
                    high = mid;
                }
            }
            Ok(found)
        }
    }
}

pub fn resolve_batch(
    store: &dyn Storage,
    lookup: ConfigLookup,
    draw_ids: &[u64],
) -> Result<Vec<PrizeConfig>, ContractError> {
    draw_ids
        .iter()
        .map(|draw_id| resolve(store, lookup, *draw_id).map(|entry| entry.prize_config))
        .collect()
}
