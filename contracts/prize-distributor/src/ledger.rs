use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

use crate::error::ContractError;

#[cw_serde]
pub struct ClaimRecord {
    pub draw_id: u64,
    pub paid: Uint128,
}

/// Fixed ring of the payouts recorded for a user, slot `draw_id % capacity`.
#[cw_serde]
pub struct ClaimLedger {
    pub records: Vec<Option<ClaimRecord>>,
}

impl ClaimLedger {
    pub fn new(capacity: u32) -> Self {
        Self {
            records: vec![None; capacity as usize],
        }
    }

    fn slot(&self, draw_id: u64) -> usize {
        (draw_id % self.records.len() as u64) as usize
    }

    /// Amount already paid for `draw_id`; a slot holding another draw counts
    /// as nothing paid.
    pub fn paid(&self, draw_id: u64) -> Uint128 {
        match &self.records[self.slot(draw_id)] {
            Some(record) if record.draw_id == draw_id => record.paid,
            _ => Uint128::zero(),
        }
    }

    /// Records `computed` as the payout for `draw_id` and returns the part not
    /// yet paid out.
    pub fn record(&mut self, draw_id: u64, computed: Uint128) -> Result<Uint128, ContractError> {
        let paid = self.paid(draw_id);
        if computed < paid {
            return Err(ContractError::PayoutBelowThreshold {
                draw_id,
                computed,
                paid,
            });
        }
        let slot = self.slot(draw_id);
        self.records[slot] = Some(ClaimRecord {
            draw_id,
            paid: computed,
        });
        Ok(computed - paid)
    }

    /// Populated records, oldest draw first.
    pub fn history(&self) -> Vec<ClaimRecord> {
        let mut records: Vec<ClaimRecord> = self.records.iter().flatten().cloned().collect();
        records.sort_by_key(|record| record.draw_id);
        records
    }
}

/// Claimable window is the newest `capacity` draws.
pub fn check_claim_window(
    draw_ids: &[u64],
    newest: u64,
    capacity: u32,
) -> Result<(), ContractError> {
    let oldest = newest.saturating_sub(u64::from(capacity) - 1);
    for draw_id in draw_ids {
        if *draw_id > newest || *draw_id < oldest {
            return Err(ContractError::DrawIdOutOfRange {
                draw_id: *draw_id,
                oldest,
                newest,
            });
        }
    }
    Ok(())
}
