use serde::{Deserialize, Serialize};

use crate::problem::TimeValue;

#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default, Serialize, Deserialize)]
pub struct TimeInterval {
    pub time_start: TimeValue,
    pub time_end: TimeValue,
}

impl TimeInterval {
    pub fn new(time_start: TimeValue, time_end: TimeValue) -> TimeInterval {
        TimeInterval {
            time_start,
            time_end,
        }
    }

    pub fn duration(start: TimeValue, duration: TimeValue) -> TimeInterval {
        TimeInterval {
            time_start: start,
            time_end: start + duration,
        }
    }

    /// Half-open overlap test: intervals that merely touch at an endpoint do
    /// not overlap.
    pub fn overlap(&self, other: &Self) -> bool {
        self.time_start < other.time_end && other.time_start < self.time_end
    }

    pub fn shift(&self, offset: TimeValue) -> Self {
        Self {
            time_start: self.time_start + offset,
            time_end: self.time_end + offset,
        }
    }

    pub fn length(&self) -> TimeValue {
        self.time_end - self.time_start
    }
}
