//! Actions: every state change, as data.
//!
//! Serialized actions are internally tagged with SCREAMING_SNAKE_CASE type
//! names and camelCase fields:
//!
//! ```json
//! {"type": "TOGGLE_HABIT", "date": "2024-01-15", "habitId": "hydrate"}
//! ```
//!
//! Unrecognized type names deserialize to [`Action::Unknown`], which the
//! reducer ignores.

use serde::{Deserialize, Serialize};

use crate::date::DateKey;
use crate::habit::Habit;
use crate::planning::{Mood, Prompt};
use crate::schedule::{BlockPatch, ScheduleBlock};
use crate::task::{Subtask, Task, TaskFilter, TaskPatch};
use crate::timer::{TimerSettingsPatch, TimerStatePatch};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    AddPrompt {
        prompt: Prompt,
    },
    RemovePrompt {
        id: String,
    },
    UpdatePromptResponse {
        date: DateKey,
        prompt_id: String,
        value: String,
    },
    /// `mood: None` clears the day's check-in.
    SetMood {
        date: DateKey,
        #[serde(default)]
        mood: Option<Mood>,
    },

    AddTask {
        task: Task,
    },
    UpdateTask {
        id: String,
        updates: TaskPatch,
    },
    DeleteTask {
        id: String,
    },
    AddSubtask {
        task_id: String,
        subtask: Subtask,
    },
    ToggleSubtask {
        task_id: String,
        subtask_id: String,
    },
    RemoveSubtask {
        task_id: String,
        subtask_id: String,
    },
    SetTaskFilter {
        filter: TaskFilter,
    },

    SetNotes {
        text: String,
    },
    PinNote {
        text: String,
    },
    UnpinNote {
        text: String,
    },

    ToggleHabit {
        date: DateKey,
        habit_id: String,
    },
    AddHabit {
        habit: Habit,
    },
    RemoveHabit {
        id: String,
    },

    AddScheduleBlock {
        block: ScheduleBlock,
    },
    UpdateScheduleBlock {
        id: String,
        updates: BlockPatch,
    },
    RemoveScheduleBlock {
        id: String,
    },

    UpdateTimerSettings {
        settings: TimerSettingsPatch,
    },
    /// The timer engine's only way in.
    SetTimerState {
        patch: TimerStatePatch,
    },

    ResetState,

    #[serde(other)]
    Unknown,
}

impl Action {
    /// Wire name of the action, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Action::AddPrompt { .. } => "ADD_PROMPT",
            Action::RemovePrompt { .. } => "REMOVE_PROMPT",
            Action::UpdatePromptResponse { .. } => "UPDATE_PROMPT_RESPONSE",
            Action::SetMood { .. } => "SET_MOOD",
            Action::AddTask { .. } => "ADD_TASK",
            Action::UpdateTask { .. } => "UPDATE_TASK",
            Action::DeleteTask { .. } => "DELETE_TASK",
            Action::AddSubtask { .. } => "ADD_SUBTASK",
            Action::ToggleSubtask { .. } => "TOGGLE_SUBTASK",
            Action::RemoveSubtask { .. } => "REMOVE_SUBTASK",
            Action::SetTaskFilter { .. } => "SET_TASK_FILTER",
            Action::SetNotes { .. } => "SET_NOTES",
            Action::PinNote { .. } => "PIN_NOTE",
            Action::UnpinNote { .. } => "UNPIN_NOTE",
            Action::ToggleHabit { .. } => "TOGGLE_HABIT",
            Action::AddHabit { .. } => "ADD_HABIT",
            Action::RemoveHabit { .. } => "REMOVE_HABIT",
            Action::AddScheduleBlock { .. } => "ADD_SCHEDULE_BLOCK",
            Action::UpdateScheduleBlock { .. } => "UPDATE_SCHEDULE_BLOCK",
            Action::RemoveScheduleBlock { .. } => "REMOVE_SCHEDULE_BLOCK",
            Action::UpdateTimerSettings { .. } => "UPDATE_TIMER_SETTINGS",
            Action::SetTimerState { .. } => "SET_TIMER_STATE",
            Action::ResetState => "RESET_STATE",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Whether this action is a timer patch. Ticks are logged at trace level.
    pub fn is_timer_patch(&self) -> bool {
        matches!(self, Action::SetTimerState { .. })
    }
}
