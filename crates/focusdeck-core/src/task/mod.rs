//! Task types, partial updates and the triage queries built on them.
//!
//! Tasks live in one ordered list; each sits in a triage [`Bucket`] and may
//! carry an ordered breakdown of [`Subtask`]s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Energy a task demands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    #[default]
    Steady,
    Low,
}

/// Triage category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Today,
    Week,
    Backlog,
}

/// Which tasks a task list shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    /// High priority only.
    Focus,
    /// Low energy only.
    LowEnergy,
    /// Not yet completed.
    InProgress,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Focus => task.priority == Priority::High,
            TaskFilter::LowEnergy => task.energy == EnergyLevel::Low,
            TaskFilter::InProgress => !task.completed,
        }
    }
}

string_enum!(Priority, "priority", {
    "high" => Priority::High,
    "medium" => Priority::Medium,
    "low" => Priority::Low,
});

string_enum!(EnergyLevel, "energy", {
    "high" => EnergyLevel::High,
    "steady" => EnergyLevel::Steady,
    "low" => EnergyLevel::Low,
});

string_enum!(Bucket, "bucket", {
    "today" => Bucket::Today,
    "week" => Bucket::Week,
    "backlog" => Bucket::Backlog,
});

string_enum!(TaskFilter, "filter", {
    "all" => TaskFilter::All,
    "focus" => TaskFilter::Focus,
    "low-energy" => TaskFilter::LowEnergy,
    "in-progress" => TaskFilter::InProgress,
});

/// One step of a task breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: format!("subtask-{}", Uuid::new_v4()),
            text: text.into(),
            completed: false,
        }
    }
}

/// Default estimate for a task created without one.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 25;

fn default_estimate() -> u32 {
    DEFAULT_ESTIMATE_MINUTES
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: EnergyLevel,
    #[serde(default = "default_estimate", alias = "estimate")]
    pub estimate_minutes: u32,
    #[serde(default)]
    pub bucket: Bucket,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(deserialize_with = "crate::date::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// New incomplete task with a fresh id, medium priority, steady energy,
    /// the default estimate, in today's bucket.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("task-{}", Uuid::new_v4()),
            title: title.into(),
            priority: Priority::default(),
            energy: EnergyLevel::default(),
            estimate_minutes: DEFAULT_ESTIMATE_MINUTES,
            bucket: Bucket::default(),
            completed: false,
            subtasks: Vec::new(),
            created_at,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimate_minutes = minutes;
        self
    }

    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }
}

/// Partial task update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the provided fields into `task`; identity and creation time
    /// never change.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(energy) = self.energy {
            task.energy = energy;
        }
        if let Some(minutes) = self.estimate_minutes {
            task.estimate_minutes = minutes;
        }
        if let Some(bucket) = self.bucket {
            task.bucket = bucket;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(subtasks) = &self.subtasks {
            task.subtasks = subtasks.clone();
        }
    }
}

/// Filtered tasks grouped by bucket, each group in list order.
#[derive(Debug, Default, Serialize)]
pub struct BucketedTasks<'a> {
    pub today: Vec<&'a Task>,
    pub week: Vec<&'a Task>,
    pub backlog: Vec<&'a Task>,
}

impl BucketedTasks<'_> {
    pub fn len(&self) -> usize {
        self.today.len() + self.week.len() + self.backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn tasks_by_bucket(tasks: &[Task], filter: TaskFilter) -> BucketedTasks<'_> {
    let mut grouped = BucketedTasks::default();
    for task in tasks.iter().filter(|t| filter.matches(t)) {
        match task.bucket {
            Bucket::Today => grouped.today.push(task),
            Bucket::Week => grouped.week.push(task),
            Bucket::Backlog => grouped.backlog.push(task),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        let mut t = Task::new(id, Utc::now());
        t.id = id.to_string();
        t
    }

    #[test]
    fn task_serializes_camel_case() {
        let t = task("task-1").with_estimate(40);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["estimateMinutes"], 40);
        assert_eq!(json["bucket"], "today");
        assert_eq!(json["energy"], "steady");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn older_task_payload_fills_defaults() {
        let t: Task = serde_json::from_str(
            r#"{"id":"t","title":"Old","createdAt":"2024-01-15T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.estimate_minutes, DEFAULT_ESTIMATE_MINUTES);
        assert!(t.subtasks.is_empty());
    }

    #[test]
    fn patch_applies_only_given_fields() {
        let mut t = task("task-1");
        let before = t.clone();
        TaskPatch {
            bucket: Some(Bucket::Backlog),
            ..TaskPatch::default()
        }
        .apply(&mut t);
        assert_eq!(t.bucket, Bucket::Backlog);
        assert_eq!(t.title, before.title);
        assert_eq!(t.id, before.id);
    }

    #[test]
    fn filters_select_expected_tasks() {
        let high = task("a").with_priority(Priority::High);
        let low_energy = task("b").with_energy(EnergyLevel::Low);
        let mut done = task("c");
        done.completed = true;

        assert!(TaskFilter::Focus.matches(&high));
        assert!(!TaskFilter::Focus.matches(&low_energy));
        assert!(TaskFilter::LowEnergy.matches(&low_energy));
        assert!(!TaskFilter::InProgress.matches(&done));
        assert!(TaskFilter::All.matches(&done));
    }

    #[test]
    fn bucketing_keeps_list_order() {
        let tasks = vec![
            task("a"),
            task("b").with_bucket(Bucket::Week),
            task("c"),
            task("d").with_bucket(Bucket::Backlog),
        ];
        let grouped = tasks_by_bucket(&tasks, TaskFilter::All);
        let ids: Vec<_> = grouped.today.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(grouped.week.len(), 1);
        assert_eq!(grouped.backlog.len(), 1);
        assert_eq!(grouped.len(), 4);
    }

    #[test]
    fn enums_parse_from_cli_text() {
        assert_eq!("low-energy".parse::<TaskFilter>().unwrap(), TaskFilter::LowEnergy);
        assert_eq!("week".parse::<Bucket>().unwrap(), Bucket::Week);
        assert_eq!(Priority::High.to_string(), "high");
        assert!("urgent".parse::<Priority>().is_err());
    }
}
