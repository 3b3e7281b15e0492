use std::collections::HashMap;
use std::io::{BufRead, Write};

use chrono::{NaiveTime, Timelike};
use log::warn;
use serde::Deserialize;

use crate::interval::TimeInterval;
use crate::problem::{Problem, TimeValue, Train, PRIORITY_LOWEST};

/// Parses a wall-clock "HH:MM" string or a plain numeric literal into
/// fractional hours. Any parse failure falls back to 0.0; the scheduling
/// core never sees a malformed time.
pub fn parse_time(s: &str) -> TimeValue {
    let s = s.trim();
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return t.hour() as TimeValue + t.minute() as TimeValue / 60.0;
    }
    match s.parse::<TimeValue>() {
        Ok(v) => v,
        Err(_) => {
            warn!("unparseable time {:?}, defaulting to 0.0", s);
            0.0
        }
    }
}

/// One stop record of a schedule document, as handed back by a schedule data
/// service keyed by train identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    pub train: String,
    pub platform: Option<String>,
    pub arrival: Option<String>,
    pub departure: Option<String>,
    pub priority: Option<i32>,
}

/// Stop records indexed by train id. The exchange that produced the document
/// (HTTP request, dump on disk) belongs to the caller; this type owns the
/// response format and the field mapping into `Train`.
pub struct ScheduleSource {
    stops: HashMap<String, StopRecord>,
}

impl ScheduleSource {
    pub fn from_json(text: &str) -> Result<ScheduleSource, serde_json::Error> {
        let records: Vec<StopRecord> = serde_json::from_str(text)?;
        Ok(ScheduleSource {
            stops: records
                .into_iter()
                .map(|r| (r.train.clone(), r))
                .collect(),
        })
    }

    /// Maps the stop record for `train_id` into a `Train`. Missing arrival or
    /// departure default to 0.0, missing priority to the lowest precedence.
    /// A record without a platform cannot be placed and is skipped.
    pub fn lookup(&self, train_id: &str) -> Option<Train> {
        let stop = self.stops.get(train_id)?;
        let platform = match &stop.platform {
            Some(p) => p.clone(),
            None => {
                warn!("schedule entry for {} has no platform, skipping", train_id);
                return None;
            }
        };
        let time_start = stop.arrival.as_deref().map(parse_time).unwrap_or(0.0);
        let time_end = stop.departure.as_deref().map(parse_time).unwrap_or(0.0);
        Some(Train {
            id: stop.train.clone(),
            platform,
            interval: TimeInterval::new(time_start, time_end),
            priority: stop.priority.unwrap_or(PRIORITY_LOWEST),
        })
    }
}

/// Loads a `Problem` serialized as JSON.
pub fn read_problem_file(path: &str) -> std::io::Result<Problem> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> std::io::Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Interactive collection: prompts for the platform set, then for each train
/// its id, platform, interval and priority. Start and end accept "HH:MM" or
/// numeric hours; malformed counts or priorities fall back to 0 resp. the
/// lowest precedence.
pub fn read_problem(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> std::io::Result<Problem> {
    let p_count = prompt(input, output, "Enter number of platforms: ")?
        .parse::<usize>()
        .unwrap_or(0);
    let mut platforms = Vec::new();
    for i in 0..p_count {
        platforms.push(prompt(input, output, &format!("Platform {} ID: ", i + 1))?);
    }

    let n = prompt(input, output, "\nEnter number of trains: ")?
        .parse::<usize>()
        .unwrap_or(0);
    let mut trains = Vec::new();
    for i in 0..n {
        writeln!(output, "\nEnter details for Train {}", i + 1)?;
        let id = prompt(input, output, "Train ID: ")?;
        let platform = prompt(input, output, "Assigned Platform: ")?;
        let time_start = parse_time(&prompt(input, output, "Start Time: ")?);
        let time_end = parse_time(&prompt(input, output, "End Time: ")?);
        let priority = prompt(input, output, "Priority: ")?
            .parse::<i32>()
            .unwrap_or(PRIORITY_LOWEST);
        trains.push(Train {
            id,
            platform,
            interval: TimeInterval::new(time_start, time_end),
            priority,
        });
    }

    Ok(Problem { platforms, trains })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    pub fn parses_wall_clock_and_numeric_times() {
        assert_eq!(parse_time("08:30"), 8.5);
        assert_eq!(parse_time("00:00"), 0.0);
        assert_eq!(parse_time("23:45"), 23.75);
        assert_eq!(parse_time("7.25"), 7.25);
        assert_eq!(parse_time(" 12 "), 12.0);
        assert_eq!(parse_time("not a time"), 0.0);
        assert_eq!(parse_time("25:99"), 0.0);
    }

    #[test]
    pub fn maps_stop_records_with_defaults() {
        let source = ScheduleSource::from_json(
            r#"[
                {"train": "IC1", "platform": "P2", "arrival": "08:30", "departure": "08:45", "priority": 1},
                {"train": "RB7", "platform": "P1", "arrival": "bogus"},
                {"train": "LOST"}
            ]"#,
        )
        .unwrap();

        let ic1 = source.lookup("IC1").unwrap();
        assert_eq!(ic1.platform, "P2");
        assert_eq!(ic1.interval.time_start, 8.5);
        assert_eq!(ic1.interval.time_end, 8.75);
        assert_eq!(ic1.priority, 1);

        let rb7 = source.lookup("RB7").unwrap();
        assert_eq!(rb7.interval.time_start, 0.0);
        assert_eq!(rb7.interval.time_end, 0.0);
        assert_eq!(rb7.priority, PRIORITY_LOWEST);

        // No platform, cannot be placed.
        assert!(source.lookup("LOST").is_none());
        assert!(source.lookup("UNKNOWN").is_none());
    }

    #[test]
    pub fn collects_a_problem_interactively() {
        let dialog = "2\nP1\nP2\n1\nT1\nP1\n08:00\n8.5\n3\n";
        let mut input = Cursor::new(dialog);
        let mut output = Vec::new();
        let problem = read_problem(&mut input, &mut output).unwrap();

        assert_eq!(problem.platforms, vec!["P1", "P2"]);
        assert_eq!(problem.trains.len(), 1);
        assert_eq!(problem.trains[0].id, "T1");
        assert_eq!(problem.trains[0].interval.time_start, 8.0);
        assert_eq!(problem.trains[0].interval.time_end, 8.5);
        assert_eq!(problem.trains[0].priority, 3);
    }

    #[test]
    pub fn interactive_defaults_on_malformed_fields() {
        let dialog = "0\n1\nT1\nP1\nnoon\n10\nhigh\n";
        let mut input = Cursor::new(dialog);
        let mut output = Vec::new();
        let problem = read_problem(&mut input, &mut output).unwrap();

        assert!(problem.platforms.is_empty());
        assert_eq!(problem.trains[0].interval.time_start, 0.0);
        assert_eq!(problem.trains[0].interval.time_end, 10.0);
        assert_eq!(problem.trains[0].priority, PRIORITY_LOWEST);
    }
}
