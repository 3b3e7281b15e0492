use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

pub type TimeValue = f64;
pub type TrainRef = usize;

/// Default when a data source provides no priority. Numerically smaller
/// values take precedence, so this is the lowest precedence there is.
pub const PRIORITY_LOWEST: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: String,
    pub platform: String,
    pub interval: TimeInterval,
    #[serde(default = "priority_lowest")]
    pub priority: i32,
}

fn priority_lowest() -> i32 {
    PRIORITY_LOWEST
}

impl fmt::Display for Train {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Train {} | Platform: {} | Start: {} | End: {} | Priority: {}",
            self.id,
            self.platform,
            self.interval.time_start,
            self.interval.time_end,
            self.priority
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub platforms: Vec<String>,
    pub trains: Vec<Train>,
}

pub fn instance1() -> Problem {
    Problem {
        platforms: vec!["P1".to_string(), "P2".to_string(), "P3".to_string()],
        trains: vec![
            Train {
                id: "T1".to_string(),
                platform: "P1".to_string(),
                interval: TimeInterval::new(10.0, 20.0),
                priority: 1,
            },
            Train {
                id: "T2".to_string(),
                platform: "P1".to_string(),
                interval: TimeInterval::new(12.0, 18.0),
                priority: 2,
            },
            Train {
                id: "T3".to_string(),
                platform: "P2".to_string(),
                interval: TimeInterval::new(15.0, 25.0),
                priority: 2,
            },
        ],
    }
}
