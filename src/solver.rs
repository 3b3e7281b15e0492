use log::{debug, trace};

use crate::occupation::is_platform_free;
use crate::problem::{TimeValue, Train, TrainRef};

/// Resolves platform conflicts by mutating the timetable in place.
///
/// The timetable is stably sorted by start time, then each train is processed
/// once, top to bottom. A train in conflict holds its slot when it has the
/// highest precedence of its conflict group (numerically smallest priority,
/// ties going to the processed train); otherwise it is moved to the platform
/// reassignment or forward delay that clears its current conflicts at minimum
/// cost, and re-checked until it is conflict-free or holds.
///
/// This is a single forward pass. A conflict deferred by a holding train is
/// cleared when the lower-priority trains take their own turn; if those turns
/// have already passed, the conflict survives the call. There is deliberately
/// no outer fixed-point loop over all trains.
pub fn resolve_conflicts(timetable: &mut [Train], platforms: &[String]) {
    let _p = hprof::enter("resolve_conflicts");

    timetable.sort_by(|a, b| a.interval.time_start.total_cmp(&b.interval.time_start));

    for t in 0..timetable.len() {
        loop {
            let conflicts = conflicting_trains(timetable, t);
            if conflicts.is_empty() {
                break;
            }

            // First-encountered minimum over [t] + conflicts, so t wins ties
            // and keeps its slot.
            let mut winner = t;
            for &u in &conflicts {
                if timetable[u].priority < timetable[winner].priority {
                    winner = u;
                }
            }
            if winner == t {
                trace!(
                    "train {} holds its slot, deferring {} conflict(s)",
                    timetable[t].id,
                    conflicts.len()
                );
                break;
            }

            move_train(timetable, t, &conflicts, platforms);
        }
    }
}

/// The trains currently conflicting with `t`: same platform, overlapping
/// interval, `t` itself excluded. Index order.
fn conflicting_trains(timetable: &[Train], t: TrainRef) -> Vec<TrainRef> {
    (0..timetable.len())
        .filter(|&u| {
            u != t
                && timetable[u].platform == timetable[t].platform
                && timetable[t].interval.overlap(&timetable[u].interval)
        })
        .collect()
}

/// Applies the cheapest move that clears `t`'s current conflicts: the first
/// fully free platform in scan order wins with zero delay, otherwise the
/// platform whose blocking occupations clear earliest (the current platform
/// included). Platform switch and residual delay are applied as one move.
fn move_train(timetable: &mut [Train], t: TrainRef, conflicts: &[TrainRef], platforms: &[String]) {
    let current = timetable[t].interval;

    let latest_end = conflicts
        .iter()
        .map(|&u| timetable[u].interval.time_end)
        .fold(TimeValue::NEG_INFINITY, TimeValue::max);

    // Sliding forward on the current platform is always available; overlap
    // guarantees latest_end > current.time_start, so this delay is positive.
    let mut best_platform: Option<usize> = None;
    let mut best_delay = latest_end - current.time_start;

    for (p_idx, p) in platforms.iter().enumerate() {
        if *p == timetable[t].platform {
            continue;
        }
        if is_platform_free(timetable, p, current, t) {
            best_platform = Some(p_idx);
            best_delay = 0.0;
            break;
        }
        let clears_at = timetable
            .iter()
            .filter(|other| other.platform == *p && current.overlap(&other.interval))
            .map(|other| other.interval.time_end)
            .fold(TimeValue::NEG_INFINITY, TimeValue::max);
        let p_delay = clears_at - current.time_start;
        if p_delay < best_delay {
            best_platform = Some(p_idx);
            best_delay = p_delay;
        }
    }

    if let Some(p_idx) = best_platform {
        timetable[t].platform = platforms[p_idx].clone();
    }
    timetable[t].interval = current.shift(best_delay);

    debug!(
        "moved train {} to platform {} [{} -> {}] (delay {})",
        timetable[t].id,
        timetable[t].platform,
        timetable[t].interval.time_start,
        timetable[t].interval.time_end,
        best_delay
    );
}
