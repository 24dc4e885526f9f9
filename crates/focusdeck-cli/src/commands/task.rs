use clap::Subcommand;
use focusdeck_core::task::tasks_by_bucket;
use focusdeck_core::validation;
use focusdeck_core::{Action, Bucket, EnergyLevel, Priority, Subtask, Task, TaskFilter, TaskPatch};

use crate::common::{now, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Energy the task needs: high, steady or low
        #[arg(long, default_value = "steady")]
        energy: EnergyLevel,
        /// Estimate in minutes
        #[arg(long, default_value_t = focusdeck_core::task::DEFAULT_ESTIMATE_MINUTES)]
        estimate: u32,
        /// today, week or backlog
        #[arg(long, default_value = "today")]
        bucket: Bucket,
    },
    /// Change fields of a task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        energy: Option<EnergyLevel>,
        #[arg(long)]
        estimate: Option<u32>,
        #[arg(long)]
        bucket: Option<Bucket>,
    },
    /// Mark a task complete (or incomplete with --undo)
    Done {
        id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Delete a task
    Rm { id: String },
    /// List tasks grouped by bucket
    List {
        /// all, focus, low-energy or in-progress (defaults to the saved filter)
        #[arg(long)]
        filter: Option<TaskFilter>,
    },
    /// Set the saved task filter
    Filter { filter: TaskFilter },
    /// Subtask management
    Subtask {
        #[command(subcommand)]
        action: SubtaskAction,
    },
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Append a subtask
    Add { task_id: String, text: String },
    /// Flip a subtask's completion
    Toggle { task_id: String, subtask_id: String },
    /// Remove a subtask
    Rm { task_id: String, subtask_id: String },
}

fn print_task(state: &focusdeck_core::DashboardState, id: &str) -> CliResult {
    match state.task(id) {
        Some(task) => print_json(task),
        None => Err(format!("task not found: {id}").into()),
    }
}

pub fn run(ctx: &Context, action: TaskAction) -> CliResult {
    match action {
        TaskAction::Add {
            title,
            priority,
            energy,
            estimate,
            bucket,
        } => {
            let title = validation::title("title", &title)?;
            let task = Task::new(title, now())
                .with_priority(priority)
                .with_energy(energy)
                .with_estimate(estimate)
                .with_bucket(bucket);
            let id = task.id.clone();
            let state = ctx.dispatch(Action::AddTask { task })?;
            print_task(&state, &id)?;
        }
        TaskAction::Update {
            id,
            title,
            priority,
            energy,
            estimate,
            bucket,
        } => {
            let title = title
                .map(|t| validation::title("title", &t).map(str::to_string))
                .transpose()?;
            let updates = TaskPatch {
                title,
                priority,
                energy,
                estimate_minutes: estimate,
                bucket,
                ..TaskPatch::default()
            };
            if updates.is_empty() {
                return Err("nothing to update".into());
            }
            let state = ctx.dispatch(Action::UpdateTask {
                id: id.clone(),
                updates,
            })?;
            print_task(&state, &id)?;
        }
        TaskAction::Done { id, undo } => {
            let state = ctx.dispatch(Action::UpdateTask {
                id: id.clone(),
                updates: TaskPatch::completed(!undo),
            })?;
            print_task(&state, &id)?;
        }
        TaskAction::Rm { id } => {
            let state = ctx.dispatch(Action::DeleteTask { id })?;
            print_json(&state.tasks)?;
        }
        TaskAction::List { filter } => {
            let store = ctx.open_store()?;
            let state = store.state();
            let filter = filter.unwrap_or(state.task_filter);
            print_json(&tasks_by_bucket(&state.tasks, filter))?;
        }
        TaskAction::Filter { filter } => {
            let state = ctx.dispatch(Action::SetTaskFilter { filter })?;
            print_json(&tasks_by_bucket(&state.tasks, state.task_filter))?;
        }
        TaskAction::Subtask { action } => {
            let (task_id, action) = match action {
                SubtaskAction::Add { task_id, text } => {
                    let text = validation::title("subtask", &text)?;
                    let subtask = Subtask::new(text);
                    (
                        task_id.clone(),
                        Action::AddSubtask { task_id, subtask },
                    )
                }
                SubtaskAction::Toggle {
                    task_id,
                    subtask_id,
                } => (
                    task_id.clone(),
                    Action::ToggleSubtask {
                        task_id,
                        subtask_id,
                    },
                ),
                SubtaskAction::Rm {
                    task_id,
                    subtask_id,
                } => (
                    task_id.clone(),
                    Action::RemoveSubtask {
                        task_id,
                        subtask_id,
                    },
                ),
            };
            let state = ctx.dispatch(action)?;
            print_task(&state, &task_id)?;
        }
    }
    Ok(())
}
