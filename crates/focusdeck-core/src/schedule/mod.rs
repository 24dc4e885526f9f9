//! Time-blocked schedule for a single day.
//!
//! Blocks are half-open `[start, end)` intervals of a day, optionally linked
//! to a task. Overlapping blocks are legal state; [`conflict`] reports them.

pub mod conflict;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::date::TimeOfDay;
use crate::task::Task;

pub use conflict::{conflicting_ids, conflicting_ids_pairwise, overlaps};

/// A titled time interval of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    pub id: String,
    pub title: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// May reference a task that no longer exists.
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(deserialize_with = "crate::date::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl ScheduleBlock {
    pub fn new(
        title: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("block-{}", Uuid::new_v4()),
            title: title.into(),
            start,
            end,
            task_id: None,
            created_at,
        }
    }

    pub fn linked_to(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial block update. `task_id: Some(None)` unlinks the task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeOfDay>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub task_id: Option<Option<String>>,
}

impl BlockPatch {
    /// The block as it would look with this patch merged in.
    pub fn merged(&self, block: &ScheduleBlock) -> ScheduleBlock {
        let mut next = block.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(start) = self.start {
            next.start = start;
        }
        if let Some(end) = self.end {
            next.end = end;
        }
        if let Some(task_id) = &self.task_id {
            next.task_id = task_id.clone();
        }
        next
    }
}

/// The task a block points at, or `None` when unlinked or dangling.
pub fn linked_task<'a>(block: &ScheduleBlock, tasks: &'a [Task]) -> Option<&'a Task> {
    let task_id = block.task_id.as_deref()?;
    tasks.iter().find(|t| t.id == task_id)
}

/// Blocks ordered by start time, then end time; ties keep list order.
pub fn sorted_blocks(blocks: &[ScheduleBlock]) -> Vec<&ScheduleBlock> {
    let mut sorted: Vec<&ScheduleBlock> = blocks.iter().collect();
    sorted.sort_by_key(|b| (b.start, b.end));
    sorted
}
