//! Progress engine — pure XP and level derivation.

use super::types::{Area, Habit, UserStats};

/// XP granted (or revoked) by a single completion toggle.
pub const COMPLETION_XP: i64 = 10;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: i64 = 100;

/// `floor(xp / 100) + 1`.
pub fn level_for_xp(xp: i64) -> i64 {
    xp.div_euclid(XP_PER_LEVEL) + 1
}

/// Return new stats with `delta` applied to `area` and to the total, and the
/// level recomputed from scratch.
pub fn apply_delta(stats: &UserStats, area: Area, delta: i64) -> UserStats {
    let mut next = stats.clone();
    *next.area_xp.entry(area).or_insert(0) += delta;
    next.xp += delta;
    next.level = level_for_xp(next.xp);
    next
}

/// Re-derive the level and fill any missing areas. Used after loading stats
/// written by an older or hand-edited store.
pub fn normalize(mut stats: UserStats) -> UserStats {
    for area in Area::ALL {
        stats.area_xp.entry(area).or_insert(0);
    }
    stats.level = level_for_xp(stats.xp);
    stats
}

/// Stats implied by the completions recorded on `habits`: one
/// [`COMPLETION_XP`] per completed date, credited to the habit's area.
pub fn tally(habits: &[Habit]) -> UserStats {
    habits.iter().fold(UserStats::default(), |stats, habit| {
        let earned = COMPLETION_XP * habit.completed_dates.len() as i64;
        apply_delta(&stats, habit.area, earned)
    })
}
