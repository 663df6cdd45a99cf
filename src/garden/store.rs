//! Habit store — the in-memory habit collection and user stats, written
//! through to a [`KeyValueStore`] after every change.
//!
//! [`HabitStore::apply`] takes a [`GardenEvent`] and dispatches to
//! [`HabitStore::create`] or [`HabitStore::toggle_completion`]. XP changes are
//! delegated to the pure [`progress`](super::progress) engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use super::progress::{self, COMPLETION_XP};
use super::types::{Area, Frequency, Habit, UserStats, DEFAULT_HABIT_EMOJI};
use crate::advisor::HabitSuggestion;
use crate::error::GardenError;
use crate::storage::{self, KeyValueStore, HABITS_KEY, STATS_KEY};

/// Input for creating a habit.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub title: String,
    pub area: Area,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

impl NewHabit {
    pub fn new(title: impl Into<String>, area: Area) -> Self {
        Self {
            title: title.into(),
            area,
            description: None,
            emoji: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

impl From<HabitSuggestion> for NewHabit {
    fn from(s: HabitSuggestion) -> Self {
        Self {
            title: s.title,
            area: s.area,
            description: Some(s.description),
            emoji: Some(s.emoji),
        }
    }
}

/// A user intent against the store.
#[derive(Debug, Clone)]
pub enum GardenEvent {
    Create(NewHabit),
    ToggleCompletion { habit_id: String, date: NaiveDate },
}

/// What a toggle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub habit_id: String,
    pub date: NaiveDate,
    /// `true` if the date is now completed, `false` if it was undone.
    pub completed: bool,
    pub streak: u32,
    pub xp_delta: i64,
}

/// Result of applying a [`GardenEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Created(Habit),
    Toggled(ToggleOutcome),
    /// The event referenced a habit that does not exist. Nothing changed.
    Ignored,
}

/// Point-in-time copy of the store's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenSnapshot {
    pub habits: Vec<Habit>,
    pub stats: UserStats,
}

/// How many habits were completed on a day and which areas they touched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayProgress {
    pub completed: usize,
    pub areas: Vec<Area>,
}

pub struct HabitStore {
    kv: Arc<dyn KeyValueStore>,
    habits: Vec<Habit>,
    stats: UserStats,
}

impl HabitStore {
    /// Load habits and stats from `kv`. A missing habit collection starts the
    /// garden with [`starter_habits`]; a corrupt collection falls back the same way.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with(kv, starter_habits())
    }

    /// Load with an explicitly empty collection when nothing is stored yet.
    pub fn load_empty(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with(kv, Vec::new())
    }

    /// Stats are rebuilt from the habits' completed dates when the stored
    /// value is missing, corrupt, or out of step with the habits.
    fn load_with(kv: Arc<dyn KeyValueStore>, default_habits: Vec<Habit>) -> Self {
        let habits: Vec<Habit> = storage::load_json_or(kv.as_ref(), HABITS_KEY, default_habits);
        let earned = progress::tally(&habits);
        let stats = match storage::load_json::<UserStats>(kv.as_ref(), STATS_KEY) {
            Ok(Some(stored)) => {
                let stored = progress::normalize(stored);
                if stored == earned {
                    stored
                } else {
                    tracing::warn!(
                        stored_xp = stored.xp,
                        earned_xp = earned.xp,
                        "stored stats disagree with completions, rebuilding"
                    );
                    earned
                }
            }
            Ok(None) => earned,
            Err(e) => {
                tracing::warn!(error = %e, "stored stats unusable, rebuilding from completions");
                earned
            }
        };
        tracing::debug!(habits = habits.len(), xp = stats.xp, "habit store loaded");
        Self { kv, habits, stats }
    }

    /// Apply one event. Every change is persisted before this returns.
    pub fn apply(&mut self, event: GardenEvent) -> Result<Applied, GardenError> {
        match event {
            GardenEvent::Create(new) => self.create(new).map(Applied::Created),
            GardenEvent::ToggleCompletion { habit_id, date } => Ok(self
                .toggle_completion(&habit_id, date)
                .map_or(Applied::Ignored, Applied::Toggled)),
        }
    }

    /// Create a habit. Rejects a blank title without touching state.
    pub fn create(&mut self, new: NewHabit) -> Result<Habit, GardenError> {
        let habit = self.insert(new)?;
        self.persist();
        Ok(habit)
    }

    /// Create a habit from an accepted AI suggestion.
    pub fn adopt(&mut self, suggestion: HabitSuggestion) -> Result<Habit, GardenError> {
        self.create(suggestion.into())
    }

    /// Flip completion of `habit_id` on `date`. `None` (and no write) for an
    /// unknown id.
    pub fn toggle_completion(&mut self, habit_id: &str, date: NaiveDate) -> Option<ToggleOutcome> {
        let Some(outcome) = self.flip(habit_id, date) else {
            tracing::debug!(habit_id, "toggle for unknown habit ignored");
            return None;
        };
        self.persist();
        Some(outcome)
    }

    pub fn snapshot(&self) -> GardenSnapshot {
        GardenSnapshot {
            habits: self.habits.clone(),
            stats: self.stats.clone(),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn get(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    /// Titles of every habit, in collection order.
    pub fn titles(&self) -> Vec<String> {
        self.habits.iter().map(|h| h.title.clone()).collect()
    }

    /// Count of habits completed on `date` and the distinct areas among them.
    pub fn completed_on(&self, date: NaiveDate) -> DayProgress {
        day_progress(&self.habits, date)
    }

    fn insert(&mut self, new: NewHabit) -> Result<Habit, GardenError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(GardenError::EmptyTitle);
        }

        let habit = Habit {
            id: uuid::Uuid::now_v7().to_string(),
            title: title.to_string(),
            description: new.description.unwrap_or_default(),
            area: new.area,
            frequency: Frequency::Daily,
            streak: 0,
            completed_dates: BTreeSet::new(),
            created_at: Utc::now(),
            emoji: new
                .emoji
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HABIT_EMOJI.to_string()),
        };

        tracing::info!(habit_id = %habit.id, area = %habit.area, "habit created");
        self.habits.push(habit.clone());
        Ok(habit)
    }

    fn flip(&mut self, habit_id: &str, date: NaiveDate) -> Option<ToggleOutcome> {
        let habit = self.habits.iter_mut().find(|h| h.id == habit_id)?;

        let (completed, delta) = if habit.completed_dates.remove(&date) {
            habit.streak = habit.streak.saturating_sub(1);
            (false, -COMPLETION_XP)
        } else {
            habit.completed_dates.insert(date);
            habit.streak += 1;
            (true, COMPLETION_XP)
        };

        let area = habit.area;
        let outcome = ToggleOutcome {
            habit_id: habit.id.clone(),
            date,
            completed,
            streak: habit.streak,
            xp_delta: delta,
        };

        self.stats = progress::apply_delta(&self.stats, area, delta);
        tracing::info!(
            habit_id = %outcome.habit_id,
            %date,
            completed,
            streak = outcome.streak,
            xp = self.stats.xp,
            level = self.stats.level,
            "completion toggled"
        );
        Some(outcome)
    }

    /// Write habits and stats. Failures are logged, never raised.
    fn persist(&self) {
        if let Err(e) = storage::save_json(self.kv.as_ref(), HABITS_KEY, &self.habits) {
            tracing::error!(error = %e, "failed to persist habits");
        }
        if let Err(e) = storage::save_json(self.kv.as_ref(), STATS_KEY, &self.stats) {
            tracing::error!(error = %e, "failed to persist stats");
        }
    }
}

/// Count the habits completed on `date`; areas are distinct, in first-seen order.
pub fn day_progress(habits: &[Habit], date: NaiveDate) -> DayProgress {
    let mut progress = DayProgress::default();
    for habit in habits.iter().filter(|h| h.is_completed_on(date)) {
        progress.completed += 1;
        if !progress.areas.contains(&habit.area) {
            progress.areas.push(habit.area);
        }
    }
    progress
}

/// The two habits a brand-new garden starts with.
pub fn starter_habits() -> Vec<Habit> {
    let now = Utc::now();
    vec![
        Habit {
            id: "1".into(),
            title: "Morning Gratitude".into(),
            description: "Write down 3 things I am thankful for.".into(),
            area: Area::Spirituality,
            frequency: Frequency::Daily,
            streak: 3,
            completed_dates: BTreeSet::new(),
            created_at: now,
            emoji: "🙏".into(),
        },
        Habit {
            id: "2".into(),
            title: "Deep Work Block".into(),
            description: "90 minutes of focused work without phone.".into(),
            area: Area::Career,
            frequency: Frequency::Daily,
            streak: 1,
            completed_dates: BTreeSet::new(),
            created_at: now,
            emoji: "💼".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn empty_store() -> HabitStore {
        HabitStore::load_empty(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn fresh_store_is_seeded_with_starters() {
        let store = HabitStore::load(Arc::new(MemoryStore::new()));
        assert_eq!(store.titles(), vec!["Morning Gratitude", "Deep Work Block"]);
        assert_eq!(store.stats(), &UserStats::default());
    }

    #[test]
    fn create_applies_defaults() {
        let mut store = empty_store();
        let habit = store.create(NewHabit::new("  Walk ", Area::Health)).unwrap();
        assert_eq!(habit.title, "Walk");
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.frequency, Frequency::Daily);
        assert_eq!(habit.emoji, DEFAULT_HABIT_EMOJI);
        assert_eq!(habit.description, "");
        assert!(habit.completed_dates.is_empty());
        assert!(!habit.id.is_empty());
    }

    #[test]
    fn blank_title_is_rejected_without_mutation() {
        let mut store = empty_store();
        let err = store.create(NewHabit::new("   ", Area::Health)).unwrap_err();
        assert!(matches!(err, GardenError::EmptyTitle));
        assert!(store.habits().is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut store = empty_store();
        let a = store.create(NewHabit::new("A", Area::Career)).unwrap();
        let b = store.create(NewHabit::new("B", Area::Career)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn toggle_twice_is_reversible() {
        let mut store = empty_store();
        let id = store.create(NewHabit::new("Walk", Area::Health)).unwrap().id;
        let before = store.snapshot();

        let on = store.toggle_completion(&id, day(1)).unwrap();
        assert!(on.completed);
        assert_eq!(on.streak, 1);
        assert_eq!(store.stats().area_points(Area::Health), 10);

        let off = store.toggle_completion(&id, day(1)).unwrap();
        assert!(!off.completed);
        assert_eq!(off.streak, 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn streak_floors_at_zero() {
        let kv = Arc::new(MemoryStore::new());
        let mut habit = starter_habits().remove(1);
        habit.streak = 0;
        habit.completed_dates.insert(day(2));
        storage::save_json(kv.as_ref(), HABITS_KEY, &vec![habit]).unwrap();

        let mut store = HabitStore::load(kv);
        let outcome = store.toggle_completion("2", day(2)).unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.streak, 0);
        assert!(store.get("2").unwrap().completed_dates.is_empty());
    }

    #[test]
    fn repeated_toggles_never_duplicate_dates() {
        let mut store = HabitStore::load(Arc::new(MemoryStore::new()));
        for d in [3, 4, 3, 4, 4, 4, 5, 5, 5] {
            store.toggle_completion("2", day(d)).unwrap();
        }
        let habit = store.get("2").unwrap();
        assert_eq!(habit.completed_dates.iter().copied().collect::<Vec<_>>(), vec![day(5)]);
        assert_eq!(habit.streak, 2);
        assert_eq!(store.stats().xp, 10);
    }

    #[test]
    fn changes_are_written_through() {
        let kv = Arc::new(MemoryStore::new());
        let mut store = HabitStore::load_empty(kv.clone());
        let id = store.create(NewHabit::new("Walk", Area::Health)).unwrap().id;
        store.toggle_completion(&id, day(1));

        let reloaded = HabitStore::load(kv);
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn unknown_habit_is_a_noop() {
        let mut store = empty_store();
        store.create(NewHabit::new("Walk", Area::Health)).unwrap();
        let before = store.snapshot();
        assert!(store.toggle_completion("nope", day(1)).is_none());
        let applied = store
            .apply(GardenEvent::ToggleCompletion {
                habit_id: "nope".into(),
                date: day(1),
            })
            .unwrap();
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn completed_on_reports_distinct_areas() {
        let mut store = empty_store();
        let a = store.create(NewHabit::new("Walk", Area::Health)).unwrap().id;
        let b = store.create(NewHabit::new("Stretch", Area::Health)).unwrap().id;
        let c = store.create(NewHabit::new("Budget", Area::Finances)).unwrap().id;
        for id in [&a, &b, &c] {
            store.toggle_completion(id, day(9));
        }
        store.toggle_completion(&a, day(8));

        let progress = store.completed_on(day(9));
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.areas, vec![Area::Health, Area::Finances]);
        assert_eq!(store.completed_on(day(10)), DayProgress::default());
    }

    #[test]
    fn adopt_uses_suggestion_fields() {
        let mut store = empty_store();
        let habit = store
            .adopt(HabitSuggestion {
                title: "Morning Tea".into(),
                description: "A quiet cup before the day begins.".into(),
                area: Area::Spirituality,
                emoji: "🍵".into(),
            })
            .unwrap();
        assert_eq!(habit.emoji, "🍵");
        assert_eq!(habit.area, Area::Spirituality);
        assert_eq!(habit.description, "A quiet cup before the day begins.");
    }
}
