//! Habits and the toggle-counter streak policy.
//!
//! A streak is adjusted only by toggles: checking a habit for a day adds one,
//! unchecking removes one (never below zero). Days are not checked for
//! contiguity, so toggling on two far-apart days still grows the streak.
//! This is a known limitation and deliberately kept.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::date::DateKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub streak: u32,
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("habit-{}", Uuid::new_v4()),
            name: name.into(),
            streak: 0,
        }
    }

    pub(crate) fn seeded(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            streak: 0,
        }
    }
}

/// Per-day completion marks, keyed by date then habit id.
pub type HabitLog = BTreeMap<DateKey, BTreeMap<String, bool>>;

/// Streak after a toggle.
pub fn next_streak(streak: u32, becoming_checked: bool) -> u32 {
    if becoming_checked {
        streak.saturating_add(1)
    } else {
        streak.saturating_sub(1)
    }
}

/// Whether `habit_id` is checked on `date`; missing entries read as unchecked.
pub fn is_checked(log: &HabitLog, date: &DateKey, habit_id: &str) -> bool {
    log.get(date)
        .and_then(|day| day.get(habit_id))
        .copied()
        .unwrap_or(false)
}
