//! Garden growth — how far each habit's plant has grown, plus the summary
//! figures shown alongside the garden.

use serde::Serialize;

use super::types::{Area, Habit, UserStats};

/// Streak at which a plant's growth bar is full.
pub const FULL_GROWTH_STREAK: u32 = 30;

/// Number of habits in the top-streaks view.
pub const TOP_STREAKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantStage {
    Seed,
    Sprout,
    Clover,
    Flower,
    Tree,
}

impl PlantStage {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            0 => Self::Seed,
            1..=2 => Self::Sprout,
            3..=6 => Self::Clover,
            7..=20 => Self::Flower,
            _ => Self::Tree,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Seed => "·",
            Self::Sprout => "🌱",
            Self::Clover => "☘️",
            Self::Flower => "🌸",
            Self::Tree => "🌳",
        }
    }
}

/// Growth bar fill, 0–100.
pub fn growth_percent(streak: u32) -> u32 {
    (streak.min(FULL_GROWTH_STREAK) * 100) / FULL_GROWTH_STREAK
}

/// Habits whose plant has sprouted.
pub fn active_plants(habits: &[Habit]) -> usize {
    habits.iter().filter(|h| h.streak > 0).count()
}

/// Up to five habits with the longest running streaks, longest first.
pub fn top_streaks(habits: &[Habit]) -> Vec<&Habit> {
    let mut ranked: Vec<&Habit> = habits.iter().filter(|h| h.streak > 0).collect();
    ranked.sort_by(|a, b| b.streak.cmp(&a.streak));
    ranked.truncate(TOP_STREAKS);
    ranked
}

/// XP per area, in fixed area order.
pub fn area_balance(stats: &UserStats) -> Vec<(Area, i64)> {
    Area::ALL
        .into_iter()
        .map(|area| (area, stats.area_points(area)))
        .collect()
}
