// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal progress percentage.
//!
//! Goals run in one of two directions. Increasing goals (run 100 km) report
//! `current / target`. Decreasing goals (get from 80 kg down to 70 kg) are
//! measured against the starting baseline: at 75 kg the goal is half done,
//! not 107% done.

/// Progress toward `target`, in [0, 100].
///
/// `initial` is the baseline the goal started from. A goal is decreasing
/// when its baseline lies above the target; when no baseline was recorded
/// the current value stands in for it. A non-positive target yields 0.
pub fn goal_progress(target: f64, current: f64, initial: Option<f64>) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    if current == target {
        return 100.0;
    }

    let baseline = initial.unwrap_or(current);
    if baseline > target {
        let total_span = baseline - target;
        let covered = baseline - current;
        return (covered / total_span * 100.0).clamp(0.0, 100.0);
    }

    (current / target * 100.0).clamp(0.0, 100.0)
}
