use clap::Subcommand;
use focusdeck_core::schedule::{conflicting_ids, linked_task, sorted_blocks};
use focusdeck_core::validation;
use focusdeck_core::{Action, BlockPatch, DashboardState, ScheduleBlock, TimeOfDay};

use crate::common::{now, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a time block
    Add {
        title: String,
        /// HH:MM
        start: TimeOfDay,
        /// HH:MM, after start
        end: TimeOfDay,
        /// Link the block to a task
        #[arg(long)]
        task: Option<String>,
    },
    /// Change a block
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<TimeOfDay>,
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long, conflicts_with = "unlink")]
        task: Option<String>,
        /// Drop the task link
        #[arg(long)]
        unlink: bool,
    },
    /// Remove a block
    Rm { id: String },
    /// Blocks in time order, with their tasks and conflicts
    List,
    /// Ids of overlapping blocks
    Conflicts,
}

fn print_schedule(state: &DashboardState) -> CliResult {
    let conflicts = conflicting_ids(&state.schedule_blocks);
    let blocks: Vec<_> = sorted_blocks(&state.schedule_blocks)
        .into_iter()
        .map(|block| {
            serde_json::json!({
                "block": block,
                "task": linked_task(block, &state.tasks).map(|t| &t.title),
                "conflict": conflicts.contains(&block.id),
            })
        })
        .collect();
    print_json(&blocks)
}

pub fn run(ctx: &Context, action: ScheduleAction) -> CliResult {
    match action {
        ScheduleAction::Add {
            title,
            start,
            end,
            task,
        } => {
            validation::schedule_block(&title, start, end)?;
            let mut block = ScheduleBlock::new(title.trim(), start, end, now());
            block.task_id = task;
            let state = ctx.dispatch(Action::AddScheduleBlock { block })?;
            print_schedule(&state)?;
        }
        ScheduleAction::Update {
            id,
            title,
            start,
            end,
            task,
            unlink,
        } => {
            let store = ctx.open_store()?;
            let current = store
                .state()
                .block(&id)
                .ok_or_else(|| format!("schedule block not found: {id}"))?;
            let updates = BlockPatch {
                title,
                start,
                end,
                task_id: if unlink { Some(None) } else { task.map(Some) },
            };
            let merged = updates.merged(current);
            validation::schedule_block(&merged.title, merged.start, merged.end)?;
            drop(store);

            let state = ctx.dispatch(Action::UpdateScheduleBlock { id, updates })?;
            print_schedule(&state)?;
        }
        ScheduleAction::Rm { id } => {
            let state = ctx.dispatch(Action::RemoveScheduleBlock { id })?;
            print_schedule(&state)?;
        }
        ScheduleAction::List => {
            let store = ctx.open_store()?;
            print_schedule(store.state())?;
        }
        ScheduleAction::Conflicts => {
            let store = ctx.open_store()?;
            print_json(&conflicting_ids(&store.state().schedule_blocks))?;
        }
    }
    Ok(())
}
