//! Core garden type definitions.
//!
//! Defines [`Area`] (the six fixed areas of life), [`Habit`] (one tracked
//! practice), [`UserStats`] (XP and level), and [`ChatMessage`] (a coaching turn).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Emoji used when a habit is created without one.
pub const DEFAULT_HABIT_EMOJI: &str = "🌱";

/// The six areas of life a habit can nourish. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    Health,
    Career,
    Spirituality,
    Relationships,
    Finances,
    Creativity,
}

impl Area {
    /// Every area, in display order.
    pub const ALL: [Area; 6] = [
        Area::Health,
        Area::Career,
        Area::Spirituality,
        Area::Relationships,
        Area::Finances,
        Area::Creativity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Career => "Career",
            Self::Spirituality => "Spirituality",
            Self::Relationships => "Relationships",
            Self::Finances => "Finances",
            Self::Creativity => "Creativity",
        }
    }

    /// Canonical emoji for the area.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Health => "🌿",
            Self::Career => "📘",
            Self::Spirituality => "✨",
            Self::Relationships => "💞",
            Self::Finances => "🪙",
            Self::Creativity => "🎨",
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown area of life: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

/// A tracked habit, matching the persisted `lg_habits` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable identity assigned at creation; never reused.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub area: Area,
    #[serde(default)]
    pub frequency: Frequency,
    /// Toggle counter, not a recomputed consecutive-day run.
    pub streak: u32,
    /// Calendar days the habit was completed. A set, so no duplicates.
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub emoji: String,
}

impl Habit {
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }
}

/// Gamification totals. `level` is always derived from `xp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub level: i64,
    pub xp: i64,
    #[serde(rename = "areaXP")]
    pub area_xp: BTreeMap<Area, i64>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            area_xp: Area::ALL.into_iter().map(|area| (area, 0)).collect(),
        }
    }
}

impl UserStats {
    /// XP earned in one area; untouched areas read as zero.
    pub fn area_points(&self, area: Area) -> i64 {
        self.area_xp.get(&area).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of a coaching conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}
