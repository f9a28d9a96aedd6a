//! Time-weighted average balance accumulator.
//!
//! Each account keeps a fixed ring of checkpoints. A checkpoint stores the
//! running sum of `balance * seconds` up to its timestamp, so the average
//! balance between two instants is the difference of the sums divided by the
//! elapsed time. Once an account records more checkpoints than the ring holds,
//! the oldest history is overwritten and queries reaching back past it read a
//! zero balance.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};
use thiserror::Error;

pub const DEFAULT_ACCOUNT_CAPACITY: u32 = 32;
pub const DEFAULT_SUPPLY_CAPACITY: u32 = 256;

#[derive(Error, Debug, PartialEq)]
pub enum TwabError {
    #[error("twab capacity must be at least 1")]
    InvalidCapacity,

    #[error("timestamp {now} precedes newest checkpoint {newest}")]
    TimestampRegression { now: u64, newest: u64 },

    #[error("insufficient balance: have {balance}, need {amount}")]
    InsufficientBalance { balance: Uint128, amount: Uint128 },

    #[error("balance overflow")]
    Overflow,
}

#[cw_serde]
#[derive(Copy, Default)]
pub struct Twab {
    /// Cumulative `balance * seconds` up to `timestamp`.
    pub amount: Uint256,
    pub timestamp: u64,
}

impl Twab {
    /// Extends this checkpoint to `time`, assuming `balance` was held since.
    fn extend(&self, balance: Uint128, time: u64) -> Twab {
        let elapsed = time.saturating_sub(self.timestamp);
        Twab {
            amount: self.amount + Uint256::from(balance) * Uint256::from(elapsed),
            timestamp: time,
        }
    }
}

#[cw_serde]
#[derive(Copy, Default)]
pub struct AccountDetails {
    pub balance: Uint128,
    /// Slot the next checkpoint is written to.
    pub next_twab_index: u32,
    /// Number of written slots, saturating at capacity.
    pub cardinality: u32,
}

#[cw_serde]
pub struct TwabAccount {
    pub details: AccountDetails,
    pub twabs: Vec<Twab>,
}

impl TwabAccount {
    pub fn new(capacity: u32) -> Result<Self, TwabError> {
        if capacity == 0 {
            return Err(TwabError::InvalidCapacity);
        }
        Ok(Self {
            details: AccountDetails::default(),
            twabs: vec![Twab::default(); capacity as usize],
        })
    }

    pub fn capacity(&self) -> u32 {
        self.twabs.len() as u32
    }

    pub fn balance(&self) -> Uint128 {
        self.details.balance
    }

    fn at(&self, index: u32) -> Twab {
        self.twabs[(index % self.capacity()) as usize]
    }

    pub fn newest_twab(&self) -> (u32, Twab) {
        let cap = self.capacity();
        let index = (self.details.next_twab_index + cap - 1) % cap;
        (index, self.at(index))
    }

    /// Until the ring wraps the slot at `next_twab_index` is still blank and
    /// the history starts at slot 0.
    pub fn oldest_twab(&self) -> (u32, Twab) {
        let index = self.details.next_twab_index;
        let twab = self.at(index);
        if twab.timestamp == 0 {
            (0, self.at(0))
        } else {
            (index, twab)
        }
    }

    pub fn increase_balance(&mut self, amount: Uint128, now: u64) -> Result<(), TwabError> {
        let balance = self
            .details
            .balance
            .checked_add(amount)
            .map_err(|_| TwabError::Overflow)?;
        self.record_balance_change(balance, now)
    }

    pub fn decrease_balance(&mut self, amount: Uint128, now: u64) -> Result<(), TwabError> {
        let balance = self.details.balance.checked_sub(amount).map_err(|_| {
            TwabError::InsufficientBalance {
                balance: self.details.balance,
                amount,
            }
        })?;
        self.record_balance_change(balance, now)
    }

    /// Checkpoints the balance held until `now` and switches to `new_balance`.
    /// Several changes within the same second share one checkpoint.
    pub fn record_balance_change(
        &mut self,
        new_balance: Uint128,
        now: u64,
    ) -> Result<(), TwabError> {
        let (_, newest) = self.newest_twab();
        if now < newest.timestamp {
            return Err(TwabError::TimestampRegression {
                now,
                newest: newest.timestamp,
            });
        }
        if now > newest.timestamp || self.details.cardinality == 0 {
            let next = newest.extend(self.details.balance, now);
            let cap = self.capacity();
            self.twabs[self.details.next_twab_index as usize] = next;
            self.details.next_twab_index = (self.details.next_twab_index + 1) % cap;
            self.details.cardinality = (self.details.cardinality + 1).min(cap);
        }
        self.details.balance = new_balance;
        Ok(())
    }

    /// Point balance at `target`; inside recorded history this is the average
    /// over the checkpoint bracket containing `target`.
    pub fn balance_at(&self, target: u64) -> Uint128 {
        let (newest_index, newest) = self.newest_twab();
        if newest.timestamp <= target {
            return self.details.balance;
        }
        let (oldest_index, oldest) = self.oldest_twab();
        if target < oldest.timestamp {
            return Uint128::zero();
        }
        let (before_or_at, at_or_after) = self.binary_search(newest_index, oldest_index, target);
        held_balance(&before_or_at, &at_or_after)
    }

    /// Average balance over `[start, end)`, with `end` clamped to `now`.
    pub fn average_balance_between(&self, start: u64, end: u64, now: u64) -> Uint128 {
        let end = end.min(now);
        if end <= start {
            return Uint128::zero();
        }
        let start_twab = self.twab_at(start);
        let end_twab = self.twab_at(end);
        let elapsed = Uint256::from(end_twab.timestamp - start_twab.timestamp);
        let average = (end_twab.amount - start_twab.amount) / elapsed;
        Uint128::try_from(average).unwrap_or(Uint128::MAX)
    }

    /// Cumulative accumulator value at `target`.
    pub fn twab_at(&self, target: u64) -> Twab {
        let (newest_index, newest) = self.newest_twab();
        if newest.timestamp <= target {
            return newest.extend(self.details.balance, target);
        }
        let (oldest_index, oldest) = self.oldest_twab();
        if oldest.timestamp == target {
            return oldest;
        }
        // nothing accrues before the oldest surviving checkpoint
        if target < oldest.timestamp {
            return Twab {
                amount: oldest.amount,
                timestamp: target,
            };
        }
        let (before_or_at, at_or_after) = self.binary_search(newest_index, oldest_index, target);
        before_or_at.extend(held_balance(&before_or_at, &at_or_after), target)
    }

    /// Finds the adjacent checkpoints bracketing `target`, walking the ring in
    /// logical oldest→newest order. Callers guarantee
    /// `oldest.timestamp <= target < newest.timestamp`.
    fn binary_search(&self, newest_index: u32, oldest_index: u32, target: u64) -> (Twab, Twab) {
        let cap = self.capacity();
        let mut left = oldest_index;
        let mut right = if newest_index < oldest_index {
            newest_index + cap
        } else {
            newest_index
        };

        while left <= right {
            let current = (left + right) / 2;
            let before_or_at = self.at(current);

            // blank slot: history starts further right
            if before_or_at.timestamp == 0 {
                left = current + 1;
                continue;
            }

            let at_or_after = self.at(current + 1);
            let target_at_or_after = before_or_at.timestamp <= target;
            if target_at_or_after && target <= at_or_after.timestamp {
                return (before_or_at, at_or_after);
            }

            if !target_at_or_after {
                match current.checked_sub(1) {
                    Some(next) => right = next,
                    None => break,
                }
            } else {
                left = current + 1;
            }
        }

        (self.at(oldest_index), self.at(newest_index))
    }
}

fn held_balance(before_or_at: &Twab, at_or_after: &Twab) -> Uint128 {
    let elapsed = at_or_after.timestamp - before_or_at.timestamp;
    if elapsed == 0 {
        return Uint128::zero();
    }
    let held = (at_or_after.amount - before_or_at.amount) / Uint256::from(elapsed);
    Uint128::try_from(held).unwrap_or(Uint128::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000;

    fn account() -> TwabAccount {
        TwabAccount::new(DEFAULT_ACCOUNT_CAPACITY).unwrap()
    }

    #[test]
    fn test_empty_account_reads_zero() {
        let acc = account();
        assert_eq!(acc.balance_at(T0), Uint128::zero());
        assert_eq!(acc.average_balance_between(T0, T0 + 100, T0 + 100), Uint128::zero());
    }

    #[test]
    fn test_single_mint() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(1_000), T0).unwrap();

        for duration in [1u64, 10, 86_400, 7 * 86_400] {
            assert_eq!(
                acc.average_balance_between(T0, T0 + duration, T0 + duration),
                Uint128::new(1_000)
            );
        }
        assert_eq!(acc.balance_at(T0 - 1), Uint128::zero());
        assert_eq!(acc.balance_at(T0), Uint128::new(1_000));
        assert_eq!(acc.balance_at(T0 + 500), Uint128::new(1_000));
    }

    #[test]
    fn test_average_includes_time_before_first_deposit() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(1_000), T0).unwrap();
        // half the window at 0, half at 1000
        assert_eq!(
            acc.average_balance_between(T0 - 100, T0 + 100, T0 + 100),
            Uint128::new(500)
        );
    }

    #[test]
    fn test_end_clamped_to_now() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(100), T0).unwrap();
        acc.increase_balance(Uint128::new(300), T0 + 10).unwrap();
        // clamp end from T0 + 1000 to T0 + 20: (100*10 + 400*10) / 20
        assert_eq!(
            acc.average_balance_between(T0, T0 + 1_000, T0 + 20),
            Uint128::new(250)
        );
        assert_eq!(acc.average_balance_between(T0 + 30, T0 + 40, T0 + 20), Uint128::zero());
    }

    #[test]
    fn test_same_instant_changes_collapse() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(100), T0).unwrap();
        acc.increase_balance(Uint128::new(50), T0).unwrap();
        acc.decrease_balance(Uint128::new(30), T0).unwrap();
        assert_eq!(acc.details.cardinality, 1);
        assert_eq!(acc.details.balance, Uint128::new(120));

        acc.increase_balance(Uint128::new(80), T0 + 10).unwrap();
        assert_eq!(acc.details.cardinality, 2);
        let (_, newest) = acc.newest_twab();
        assert_eq!(newest.amount, Uint256::from(1_200u128));
    }

    #[test]
    fn test_balance_at_inside_history_is_bracket_average() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(100), T0).unwrap();
        acc.increase_balance(Uint128::new(100), T0 + 10).unwrap();
        acc.decrease_balance(Uint128::new(150), T0 + 20).unwrap();

        assert_eq!(acc.balance_at(T0 + 5), Uint128::new(100));
        assert_eq!(acc.balance_at(T0 + 15), Uint128::new(200));
        assert_eq!(acc.balance_at(T0 + 20), Uint128::new(50));
        assert_eq!(acc.balance_at(T0 + 25), Uint128::new(50));
    }

    #[test]
    fn test_decrease_below_zero_fails_without_change() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(10), T0).unwrap();
        let before = acc.clone();
        let err = acc.decrease_balance(Uint128::new(11), T0 + 5).unwrap_err();
        assert!(matches!(err, TwabError::InsufficientBalance { .. }));
        assert_eq!(acc, before);
    }

    #[test]
    fn test_timestamp_regression_rejected() {
        let mut acc = account();
        acc.increase_balance(Uint128::new(10), T0).unwrap();
        assert_eq!(
            acc.increase_balance(Uint128::new(10), T0 - 1).unwrap_err(),
            TwabError::TimestampRegression {
                now: T0 - 1,
                newest: T0
            }
        );
    }

    #[test]
    fn test_wraparound_loses_oldest_history() {
        let mut acc = TwabAccount::new(4).unwrap();
        for i in 0..6u64 {
            acc.increase_balance(Uint128::new(10), T0 + i * 100).unwrap();
        }
        assert_eq!(acc.details.cardinality, 4);
        let (oldest_index, oldest) = acc.oldest_twab();
        assert_eq!(oldest_index, 2);
        assert_eq!(oldest.timestamp, T0 + 200);
        // before the oldest surviving checkpoint the account reads as empty
        assert_eq!(acc.balance_at(T0 + 150), Uint128::zero());
        // retained brackets still interpolate
        assert_eq!(acc.balance_at(T0 + 250), Uint128::new(30));
        assert_eq!(acc.balance_at(T0 + 450), Uint128::new(50));
        assert_eq!(acc.balance_at(T0 + 500), Uint128::new(60));
    }

    #[test]
    fn test_average_after_wrap_ignores_lost_history() {
        let mut acc = TwabAccount::new(4).unwrap();
        for i in 0..6u64 {
            acc.increase_balance(Uint128::new(10), T0 + i * 100).unwrap();
        }
        let (_, oldest) = acc.oldest_twab();
        assert_eq!(oldest.timestamp, T0 + 200);
        assert_eq!(oldest.amount, Uint256::from(3_000u128));

        // entirely before the oldest checkpoint
        assert_eq!(
            acc.average_balance_between(T0 + 50, T0 + 200, T0 + 600),
            Uint128::zero()
        );
        // half lost (reads 0), half at 30
        assert_eq!(
            acc.average_balance_between(T0 + 100, T0 + 300, T0 + 600),
            Uint128::new(15)
        );
        // no window may average above the largest balance ever held
        for start in (T0..T0 + 600).step_by(50) {
            let average = acc.average_balance_between(start, T0 + 600, T0 + 600);
            assert!(average <= Uint128::new(60), "start {}", start);
        }
    }

    #[test]
    fn test_long_gap_before_wrapped_history() {
        let mut acc = TwabAccount::new(4).unwrap();
        acc.increase_balance(Uint128::new(1_000), T0).unwrap();
        let later = T0 + 1_000_000;
        for i in 0..5u64 {
            acc.increase_balance(Uint128::new(1), later + i * 100).unwrap();
        }
        let (_, oldest) = acc.oldest_twab();
        assert_eq!(oldest.timestamp, later + 100);
        assert_eq!(acc.balance_at(oldest.timestamp - 10), Uint128::zero());
        assert_eq!(
            acc.average_balance_between(oldest.timestamp - 50, oldest.timestamp, later + 1_000),
            Uint128::zero()
        );
        assert!(
            acc.average_balance_between(oldest.timestamp - 50, later + 1_000, later + 1_000)
                <= acc.balance()
        );
    }

    /// Replays every change second by second and compares the accumulator.
    #[test]
    fn test_average_matches_brute_force_replay() {
        let mut seed = 0x2545_f491_4f6c_dd1du64;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..20 {
            let mut acc = account();
            let mut changes: Vec<(u64, u128)> = vec![];
            let mut time = T0;
            let mut balance = 0u128;
            for _ in 0..(DEFAULT_ACCOUNT_CAPACITY as usize - 1) {
                time += 1 + next() % 50;
                if balance > 0 && next() % 3 == 0 {
                    let amount = next() as u128 % balance + 1;
                    acc.decrease_balance(Uint128::new(amount), time).unwrap();
                    balance -= amount;
                } else {
                    let amount = next() as u128 % 10_000;
                    acc.increase_balance(Uint128::new(amount), time).unwrap();
                    balance += amount;
                }
                changes.push((time, balance));
            }
            let now = time + 40;

            let replay = |t: u64| -> u128 {
                changes
                    .iter()
                    .rev()
                    .find(|(at, _)| *at <= t)
                    .map(|(_, b)| *b)
                    .unwrap_or(0)
            };

            for _ in 0..25 {
                let a = T0 - 20 + next() % (now - T0 + 20);
                let b = T0 - 20 + next() % (now - T0 + 20);
                let (start, end) = if a < b { (a, b) } else { (b, a) };
                if start == end {
                    continue;
                }
                let total: u128 = (start..end).map(replay).sum();
                let expected = total / u128::from(end - start);
                assert_eq!(
                    acc.average_balance_between(start, end, now),
                    Uint128::new(expected),
                    "window [{}, {})",
                    start,
                    end
                );
            }
        }
    }
}
