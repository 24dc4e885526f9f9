//! The dashboard aggregate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::habit::{Habit, HabitLog};
use crate::notes::{PIN_CAPACITY, PIN_MAX_CHARS};
use crate::planning::{default_prompts, MoodCheckins, Prompt, PromptResponses};
use crate::schedule::ScheduleBlock;
use crate::task::{Task, TaskFilter};
use crate::timer::{TimerSettings, TimerState};

/// Everything the dashboard knows. Owned by a [`crate::Store`] and replaced
/// only as a whole by the reducer.
///
/// Missing fields deserialize to their factory defaults, which is how older
/// payloads load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardState {
    pub prompts: Vec<Prompt>,
    pub prompt_responses: PromptResponses,
    pub mood_checkins: MoodCheckins,
    pub tasks: Vec<Task>,
    pub task_filter: TaskFilter,
    pub notes: String,
    pub pinned_notes: Vec<String>,
    pub habits: Vec<Habit>,
    pub habit_log: HabitLog,
    pub schedule_blocks: Vec<ScheduleBlock>,
    pub timer_settings: TimerSettings,
    pub timer_state: TimerState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            prompts: default_prompts(),
            prompt_responses: PromptResponses::new(),
            mood_checkins: MoodCheckins::new(),
            tasks: Vec::new(),
            task_filter: TaskFilter::All,
            notes: String::new(),
            pinned_notes: Vec::new(),
            habits: default_habits(),
            habit_log: HabitLog::new(),
            schedule_blocks: Vec::new(),
            timer_settings: TimerSettings::default(),
            timer_state: TimerState::default(),
        }
    }
}

fn default_habits() -> Vec<Habit> {
    vec![
        Habit::seeded("hydrate", "Drink water"),
        Habit::seeded("movement", "Take a movement break"),
        Habit::seeded("plan", "Review plan at midday"),
    ]
}

fn has_duplicates<'a>(ids: impl IntoIterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().any(|id| !seen.insert(id))
}

impl DashboardState {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn block(&self, id: &str) -> Option<&ScheduleBlock> {
        self.schedule_blocks.iter().find(|b| b.id == id)
    }

    /// First broken invariant, if any. Loaded payloads that fail this are
    /// discarded in favour of the defaults.
    pub fn violation(&self) -> Option<String> {
        if self.pinned_notes.len() > PIN_CAPACITY {
            return Some(format!("more than {PIN_CAPACITY} pinned notes"));
        }
        if has_duplicates(self.pinned_notes.iter().map(String::as_str)) {
            return Some("duplicate pinned note".into());
        }
        if self
            .pinned_notes
            .iter()
            .any(|p| p.chars().count() > PIN_MAX_CHARS)
        {
            return Some(format!("pinned note longer than {PIN_MAX_CHARS} characters"));
        }
        if let Some(block) = self.schedule_blocks.iter().find(|b| !b.is_valid()) {
            return Some(format!(
                "schedule block '{}' ends at {} before it starts at {}",
                block.id, block.end, block.start
            ));
        }
        if !self.timer_settings.is_valid() {
            return Some("non-positive timer setting".into());
        }
        if has_duplicates(self.prompts.iter().map(|p| p.id.as_str())) {
            return Some("duplicate prompt id".into());
        }
        if has_duplicates(self.tasks.iter().map(|t| t.id.as_str())) {
            return Some("duplicate task id".into());
        }
        if has_duplicates(self.habits.iter().map(|h| h.id.as_str())) {
            return Some("duplicate habit id".into());
        }
        if has_duplicates(self.schedule_blocks.iter().map(|b| b.id.as_str())) {
            return Some("duplicate schedule block id".into());
        }
        None
    }

    pub fn is_consistent(&self) -> bool {
        self.violation().is_none()
    }
}
