pub mod calculator;
pub mod ring_buffer;
pub mod twab;
pub mod types;

pub use calculator::{calculate_prize, PrizeCalculation};
pub use ring_buffer::{RingBufferError, RingBufferHistory, RingBufferState};
pub use twab::{AccountDetails, Twab, TwabAccount};
pub use types::{Draw, PrizeConfig, TimeWindow};
