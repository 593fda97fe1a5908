//! Day availability: the canonical slot grid for a date, minus booked
//! starts and admin-blocked ranges. Pure computation over data the
//! backend already read; calling it twice with the same inputs yields
//! the same answer.

use crate::types::BlockedTime;
use chrono::{Duration, NaiveTime};
use serde::Serialize;

/// The bookable grid, fixed by configuration rather than user data:
/// every `slot_minutes` from `opening` to `closing`, both ends included
/// (09:00-17:00 at 30 minutes gives 17 starts).
#[derive(Debug, Clone, Copy)]
pub struct SlotGrid {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub slot_minutes: u32,
}

impl SlotGrid {
    pub fn starts(&self) -> Vec<NaiveTime> {
        let mut starts = Vec::new();
        let mut current = self.opening;
        while current <= self.closing {
            starts.push(current);
            let next = current + Duration::minutes(i64::from(self.slot_minutes));
            if next <= current {
                // NaiveTime addition wraps at midnight
                break;
            }
            current = next;
        }
        starts
    }

    pub fn contains(&self, start: NaiveTime) -> bool {
        self.starts().contains(&start)
    }

    pub fn end_of(&self, start: NaiveTime) -> NaiveTime {
        start + Duration::minutes(i64::from(self.slot_minutes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    #[serde(with = "crate::types::hhmm")]
    pub start_time: NaiveTime,
    pub available: bool,
}

/// `taken` holds the start times of non-cancelled bookings on the date;
/// `blocks` holds the blocked times already filtered to the date. Any
/// full-day block suppresses the whole day; a partial block suppresses
/// slots starting inside [start_time, end_time).
pub fn day_availability(grid: &SlotGrid, taken: &[NaiveTime], blocks: &[BlockedTime]) -> Vec<Slot> {
    let full_day_blocked = blocks.iter().any(|block| block.is_full_day);

    grid.starts()
        .into_iter()
        .map(|start_time| {
            let blocked = full_day_blocked
                || blocks.iter().any(|block| match (block.start_time, block.end_time) {
                    (Some(from), Some(until)) => from <= start_time && start_time < until,
                    _ => false,
                });
            Slot {
                start_time,
                available: !blocked && !taken.contains(&start_time),
            }
        })
        .collect()
}
