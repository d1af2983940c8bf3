//! Inclusive date window over normalized orders.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use styleperf_core::NormalizedOrder;

use crate::error::EngineError;
use crate::stats::{DropReason, DropStats};

/// `[start 00:00:00, end 23:59:59]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Window {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWindow`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidWindow { start, end };
        if start > end {
            return Err(invalid());
        }
        let end_of_day = end.and_hms_opt(23, 59, 59).ok_or_else(invalid)?;
        Ok(Self {
            start: start.and_time(NaiveTime::MIN),
            end: end_of_day,
        })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Keeps orders whose timestamp falls inside the window, counting the
    /// rest in `drops`. Orders without a timestamp are always dropped.
    pub fn retain(&self, orders: Vec<NormalizedOrder>, drops: &mut DropStats) -> Vec<NormalizedOrder> {
        orders
            .into_iter()
            .filter(|order| match order.ts {
                None => {
                    drops.record(order.platform, DropReason::MissingTimestamp);
                    false
                }
                Some(ts) if !self.contains(ts) => {
                    drops.record(order.platform, DropReason::OutsideWindow);
                    false
                }
                Some(_) => true,
            })
            .collect()
    }
}
