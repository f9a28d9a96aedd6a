use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, Storage};
use cw_storage_plus::{Item, Map};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RingBufferError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("ring buffer capacity must be at least 1")]
    InvalidCapacity,

    #[error("id {id} is in the future (newest: {newest:?})")]
    FutureId { id: u64, newest: Option<u64> },

    #[error("id {id} has expired (oldest retained: {oldest})")]
    Expired { id: u64, oldest: u64 },

    #[error("non-sequential id: expected {expected}, got {got}")]
    NonSequentialId { expected: u64, got: u64 },

    #[error("only the newest entry ({newest}) can be replaced, got {id}")]
    NotNewest { id: u64, newest: u64 },
}

/// Cursor state of a fixed-capacity, id-addressed circular history.
///
/// Entry `id` lives in slot `id % capacity`. Ids are strictly sequential, so the
/// retained window is always `(last_id - cardinality, last_id]`.
#[cw_serde]
#[derive(Copy)]
pub struct RingBufferState {
    pub capacity: u32,
    pub last_id: u64,
    /// Number of populated slots, saturating at `capacity`.
    pub cardinality: u32,
}

impl RingBufferState {
    pub fn new(capacity: u32) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            last_id: 0,
            cardinality: 0,
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.cardinality > 0
    }

    pub fn slot(&self, id: u64) -> u32 {
        (id % u64::from(self.capacity)) as u32
    }

    /// Slot the next sequential push will write to.
    pub fn next_slot(&self) -> u32 {
        if self.is_initialized() {
            self.slot(self.last_id.wrapping_add(1))
        } else {
            0
        }
    }

    pub fn newest_id(&self) -> Option<u64> {
        self.is_initialized().then_some(self.last_id)
    }

    pub fn oldest_id(&self) -> Option<u64> {
        self.is_initialized()
            .then(|| self.last_id - (u64::from(self.cardinality) - 1))
    }

    /// Id the next push must carry, if the history has started.
    pub fn expected_next_id(&self) -> Option<u64> {
        self.newest_id().map(|id| id.saturating_add(1))
    }

    pub fn check_push(&self, id: u64) -> Result<(), RingBufferError> {
        match self.newest_id() {
            None => Ok(()),
            Some(last) => {
                let expected = last
                    .checked_add(1)
                    .ok_or(RingBufferError::NonSequentialId { expected: last, got: id })?;
                if id == expected {
                    Ok(())
                } else {
                    Err(RingBufferError::NonSequentialId { expected, got: id })
                }
            }
        }
    }

    /// Advances the cursors for `id` and returns the slot to write.
    pub fn push(&mut self, id: u64) -> Result<u32, RingBufferError> {
        self.check_push(id)?;
        self.last_id = id;
        if self.cardinality < self.capacity {
            self.cardinality += 1;
        }
        Ok(self.slot(id))
    }

    /// Resolves `id` to its slot if it is inside the retained window.
    pub fn locate(&self, id: u64) -> Result<u32, RingBufferError> {
        let newest = self.newest_id();
        match newest {
            Some(last) if id <= last => {
                if last - id >= u64::from(self.cardinality) {
                    Err(RingBufferError::Expired {
                        id,
                        oldest: last - (u64::from(self.cardinality) - 1),
                    })
                } else {
                    Ok(self.slot(id))
                }
            }
            _ => Err(RingBufferError::FutureId { id, newest }),
        }
    }
}

/// Storage-backed ring buffer: one cursor item plus one map entry per slot,
/// so a push or lookup only ever touches a single entry.
pub struct RingBufferHistory<T> {
    state: Item<RingBufferState>,
    entries: Map<u32, T>,
}

impl<T> RingBufferHistory<T> {
    pub const fn new(state_key: &'static str, entries_key: &'static str) -> Self {
        Self {
            state: Item::new(state_key),
            entries: Map::new(entries_key),
        }
    }
}

impl<T> RingBufferHistory<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn initialize(
        &self,
        store: &mut dyn Storage,
        capacity: u32,
    ) -> Result<RingBufferState, RingBufferError> {
        let state = RingBufferState::new(capacity)?;
        self.state.save(store, &state)?;
        Ok(state)
    }

    pub fn state(&self, store: &dyn Storage) -> Result<RingBufferState, RingBufferError> {
        Ok(self.state.load(store)?)
    }

    pub fn push(
        &self,
        store: &mut dyn Storage,
        id: u64,
        value: &T,
    ) -> Result<RingBufferState, RingBufferError> {
        let mut state = self.state.load(store)?;
        let slot = state.push(id)?;
        self.entries.save(store, slot, value)?;
        self.state.save(store, &state)?;
        Ok(state)
    }

    pub fn replace(
        &self,
        store: &mut dyn Storage,
        id: u64,
        value: &T,
    ) -> Result<(), RingBufferError> {
        let state = self.state.load(store)?;
        let slot = state.locate(id)?;
        if id != state.last_id {
            return Err(RingBufferError::NotNewest {
                id,
                newest: state.last_id,
            });
        }
        self.entries.save(store, slot, value)?;
        Ok(())
    }

    pub fn get(&self, store: &dyn Storage, id: u64) -> Result<T, RingBufferError> {
        let state = self.state.load(store)?;
        self.get_with(store, &state, id)
    }

    pub fn get_batch(&self, store: &dyn Storage, ids: &[u64]) -> Result<Vec<T>, RingBufferError> {
        let state = self.state.load(store)?;
        ids.iter()
            .map(|id| self.get_with(store, &state, *id))
            .collect()
    }

    pub fn newest(&self, store: &dyn Storage) -> Result<Option<(u64, T)>, RingBufferError> {
        let state = self.state.load(store)?;
        match state.newest_id() {
            Some(id) => Ok(Some((id, self.get_with(store, &state, id)?))),
            None => Ok(None),
        }
    }

    pub fn oldest(&self, store: &dyn Storage) -> Result<Option<(u64, T)>, RingBufferError> {
        let state = self.state.load(store)?;
        match state.oldest_id() {
            Some(id) => Ok(Some((id, self.get_with(store, &state, id)?))),
            None => Ok(None),
        }
    }

    fn get_with(
        &self,
        store: &dyn Storage,
        state: &RingBufferState,
        id: u64,
    ) -> Result<T, RingBufferError> {
        let slot = state.locate(id)?;
        Ok(self.entries.load(store, slot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    const HISTORY: RingBufferHistory<String> = RingBufferHistory::new("hist_state", "hist");

    fn filled(capacity: u32, ids: std::ops::RangeInclusive<u64>) -> MockStorage {
        let mut store = MockStorage::new();
        HISTORY.initialize(&mut store, capacity).unwrap();
        for id in ids {
            HISTORY.push(&mut store, id, &format!("v{}", id)).unwrap();
        }
        store
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            RingBufferState::new(0).unwrap_err(),
            RingBufferError::InvalidCapacity
        );
    }

    #[test]
    fn test_empty_buffer() {
        let store = filled(4, 1..=0);
        assert_eq!(HISTORY.newest(&store).unwrap(), None);
        assert_eq!(HISTORY.oldest(&store).unwrap(), None);
        assert!(matches!(
            HISTORY.get(&store, 0).unwrap_err(),
            RingBufferError::FutureId { id: 0, newest: None }
        ));
    }

    #[test]
    fn test_get_within_capacity() {
        let store = filled(4, 0..=2);
        for id in 0..=2 {
            assert_eq!(HISTORY.get(&store, id).unwrap(), format!("v{}", id));
        }
        assert!(matches!(
            HISTORY.get(&store, 3).unwrap_err(),
            RingBufferError::FutureId { id: 3, newest: Some(2) }
        ));
        assert_eq!(HISTORY.oldest(&store).unwrap(), Some((0, "v0".to_string())));
        assert_eq!(HISTORY.newest(&store).unwrap(), Some((2, "v2".to_string())));
    }

    #[test]
    fn test_wraparound_evicts_oldest() {
        let store = filled(4, 0..=9);
        // window is (9 - 4, 9]
        for id in 6..=9 {
            assert_eq!(HISTORY.get(&store, id).unwrap(), format!("v{}", id));
        }
        assert_eq!(
            HISTORY.get(&store, 5).unwrap_err(),
            RingBufferError::Expired { id: 5, oldest: 6 }
        );
        assert_eq!(HISTORY.oldest(&store).unwrap(), Some((6, "v6".to_string())));
        assert_eq!(HISTORY.newest(&store).unwrap(), Some((9, "v9".to_string())));
        assert_eq!(HISTORY.state(&store).unwrap().next_slot(), 2);
    }

    #[test]
    fn test_first_push_may_start_anywhere() {
        let store = filled(8, 5..=7);
        assert_eq!(HISTORY.oldest(&store).unwrap(), Some((5, "v5".to_string())));
        assert_eq!(
            HISTORY.get(&store, 4).unwrap_err(),
            RingBufferError::Expired { id: 4, oldest: 5 }
        );
    }

    #[test]
    fn test_history_starting_at_max_id() {
        let mut store = MockStorage::new();
        HISTORY.initialize(&mut store, 4).unwrap();
        HISTORY.push(&mut store, u64::MAX, &"last".to_string()).unwrap();

        assert_eq!(
            HISTORY.oldest(&store).unwrap(),
            Some((u64::MAX, "last".to_string()))
        );
        assert_eq!(
            HISTORY.get(&store, u64::MAX - 1).unwrap_err(),
            RingBufferError::Expired {
                id: u64::MAX - 1,
                oldest: u64::MAX
            }
        );
        // no id can follow
        assert!(matches!(
            HISTORY.push(&mut store, 0, &"wrapped".to_string()).unwrap_err(),
            RingBufferError::NonSequentialId { .. }
        ));
    }

    #[test]
    fn test_push_must_be_sequential() {
        let mut store = filled(4, 0..=1);
        let err = HISTORY.push(&mut store, 3, &"v3".to_string()).unwrap_err();
        assert_eq!(err, RingBufferError::NonSequentialId { expected: 2, got: 3 });
        let err = HISTORY.push(&mut store, 1, &"again".to_string()).unwrap_err();
        assert_eq!(err, RingBufferError::NonSequentialId { expected: 2, got: 1 });
        // rejected pushes leave the buffer untouched
        assert_eq!(HISTORY.state(&store).unwrap().last_id, 1);
        assert_eq!(HISTORY.get(&store, 1).unwrap(), "v1");
    }

    #[test]
    fn test_batch_preserves_order_and_duplicates() {
        let store = filled(4, 0..=3);
        let got = HISTORY.get_batch(&store, &[3, 1, 1]).unwrap();
        assert_eq!(got, vec!["v3", "v1", "v1"]);
        assert!(HISTORY.get_batch(&store, &[1, 4]).is_err());
    }

    #[test]
    fn test_replace_newest_only() {
        let mut store = filled(4, 0..=2);
        HISTORY.replace(&mut store, 2, &"fixed".to_string()).unwrap();
        assert_eq!(HISTORY.get(&store, 2).unwrap(), "fixed");
        assert_eq!(
            HISTORY.replace(&mut store, 1, &"nope".to_string()).unwrap_err(),
            RingBufferError::NotNewest { id: 1, newest: 2 }
        );
    }
}
