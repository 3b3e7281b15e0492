use log::trace;

use crate::interval::TimeInterval;
use crate::problem::{Train, TrainRef};

/// Checks whether `platform` can take an occupation over `interval`. Every
/// train assigned to the platform is tested with the half-open overlap,
/// except `exclude` (the train being placed must not conflict with itself).
pub fn is_platform_free(
    timetable: &[Train],
    platform: &str,
    interval: TimeInterval,
    exclude: TrainRef,
) -> bool {
    for (train_idx, train) in timetable.iter().enumerate() {
        if train_idx == exclude {
            continue;
        }
        if train.platform == platform && interval.overlap(&train.interval) {
            return false;
        }
    }
    true
}

/// Scans all unordered train pairs and reports every overlapping
/// same-platform pair, ordered by the pair's first index, then second.
/// Read-only; the solver recomputes its own conflict sets as it mutates the
/// timetable, so this is for reporting only.
pub fn detect_conflicts(timetable: &[Train]) -> Vec<(TrainRef, TrainRef)> {
    let _p = hprof::enter("detect_conflicts");
    let mut conflicts = Vec::new();
    for i in 0..timetable.len() {
        for j in (i + 1)..timetable.len() {
            if timetable[i].platform == timetable[j].platform
                && timetable[i].interval.overlap(&timetable[j].interval)
            {
                trace!(
                    "conflict {} {} on {}",
                    timetable[i].id,
                    timetable[j].id,
                    timetable[i].platform
                );
                conflicts.push((i, j));
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(id: &str, platform: &str, start: f64, end: f64) -> Train {
        Train {
            id: id.to_string(),
            platform: platform.to_string(),
            interval: TimeInterval::new(start, end),
            priority: 1,
        }
    }

    #[test]
    pub fn availability_excludes_the_checked_train() {
        let timetable = vec![train("A", "P1", 0.0, 10.0), train("B", "P2", 0.0, 10.0)];
        // A occupies exactly this interval, but it is excluded from the check.
        assert!(is_platform_free(
            &timetable,
            "P1",
            TimeInterval::new(0.0, 10.0),
            0
        ));
        assert!(!is_platform_free(
            &timetable,
            "P1",
            TimeInterval::new(5.0, 15.0),
            1
        ));
        assert!(is_platform_free(
            &timetable,
            "P1",
            TimeInterval::new(10.0, 15.0),
            1
        ));
        assert!(is_platform_free(&[], "P1", TimeInterval::new(0.0, 1.0), 0));
    }

    #[test]
    pub fn detects_same_platform_overlaps_in_pair_order() {
        let timetable = vec![
            train("A", "P1", 0.0, 10.0),
            train("B", "P1", 5.0, 15.0),
            train("C", "P2", 0.0, 10.0),
        ];
        assert_eq!(detect_conflicts(&timetable), vec![(0, 1)]);
    }

    #[test]
    pub fn detects_nothing_on_touching_intervals() {
        let timetable = vec![train("A", "P1", 0.0, 10.0), train("B", "P1", 10.0, 20.0)];
        assert!(detect_conflicts(&timetable).is_empty());
    }
}
