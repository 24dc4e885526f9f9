//! The state transition function.
//!
//! [`transition`] is the only place state changes. It is pure and total:
//! no clock reads, no randomness, no I/O, and every action (including
//! malformed ones) yields a state. Ids and timestamps arrive inside actions.
//! Actions that would break an invariant, or that address something that
//! does not exist, leave the state as it was.

use crate::action::Action;
use crate::habit::next_streak;
use crate::notes;
use crate::state::DashboardState;
use crate::timer::TimerMode;

pub fn transition(state: &DashboardState, action: &Action) -> DashboardState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut DashboardState, action: &Action) {
    match action {
        Action::AddPrompt { prompt } => {
            if !state.prompts.iter().any(|p| p.id == prompt.id) {
                state.prompts.push(prompt.clone());
            }
        }
        Action::RemovePrompt { id } => state.prompts.retain(|p| &p.id != id),
        Action::UpdatePromptResponse {
            date,
            prompt_id,
            value,
        } => {
            state
                .prompt_responses
                .entry(*date)
                .or_default()
                .insert(prompt_id.clone(), value.clone());
        }
        Action::SetMood { date, mood } => match mood {
            Some(mood) => {
                state.mood_checkins.insert(*date, *mood);
            }
            None => {
                state.mood_checkins.remove(date);
            }
        },

        Action::AddTask { task } => {
            if state.task(&task.id).is_none() {
                state.tasks.push(task.clone());
            }
        }
        Action::UpdateTask { id, updates } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| &t.id == id) {
                updates.apply(task);
            }
        }
        Action::DeleteTask { id } => state.tasks.retain(|t| &t.id != id),
        Action::AddSubtask { task_id, subtask } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| &t.id == task_id) {
                if task.subtask(&subtask.id).is_none() {
                    task.subtasks.push(subtask.clone());
                }
            }
        }
        Action::ToggleSubtask {
            task_id,
            subtask_id,
        } => {
            let subtask = state
                .tasks
                .iter_mut()
                .find(|t| &t.id == task_id)
                .and_then(|t| t.subtasks.iter_mut().find(|s| &s.id == subtask_id));
            if let Some(subtask) = subtask {
                subtask.completed = !subtask.completed;
            }
        }
        Action::RemoveSubtask {
            task_id,
            subtask_id,
        } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| &t.id == task_id) {
                task.subtasks.retain(|s| &s.id != subtask_id);
            }
        }
        Action::SetTaskFilter { filter } => state.task_filter = *filter,

        Action::SetNotes { text } => state.notes = text.clone(),
        Action::PinNote { text } => state.pinned_notes = notes::pin(&state.pinned_notes, text),
        Action::UnpinNote { text } => {
            state.pinned_notes = notes::unpin(&state.pinned_notes, text)
        }

        Action::ToggleHabit { date, habit_id } => {
            let day = state.habit_log.entry(*date).or_default();
            let checked = !day.get(habit_id).copied().unwrap_or(false);
            day.insert(habit_id.clone(), checked);
            // An unknown habit still gets its log entry flipped.
            if let Some(habit) = state.habits.iter_mut().find(|h| &h.id == habit_id) {
                habit.streak = next_streak(habit.streak, checked);
            }
        }
        Action::AddHabit { habit } => {
            if state.habit(&habit.id).is_none() {
                state.habits.push(habit.clone());
            }
        }
        Action::RemoveHabit { id } => state.habits.retain(|h| &h.id != id),

        Action::AddScheduleBlock { block } => {
            if block.is_valid() && state.block(&block.id).is_none() {
                state.schedule_blocks.push(block.clone());
            }
        }
        Action::UpdateScheduleBlock { id, updates } => {
            if let Some(block) = state.schedule_blocks.iter_mut().find(|b| &b.id == id) {
                let merged = updates.merged(block);
                if merged.is_valid() {
                    *block = merged;
                }
            }
        }
        Action::RemoveScheduleBlock { id } => state.schedule_blocks.retain(|b| &b.id != id),

        Action::UpdateTimerSettings { settings } => {
            state.timer_settings = settings.merged(&state.timer_settings);
            let timer = &mut state.timer_state;
            // Breaks restart at the short-break length, long breaks included.
            let mode = match timer.mode {
                TimerMode::Focus => TimerMode::Focus,
                TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::ShortBreak,
            };
            timer.seconds_remaining = state.timer_settings.seconds_for(mode);
            timer.is_running = false;
        }
        Action::SetTimerState { patch } => patch.apply(&mut state.timer_state),

        Action::ResetState => *state = DashboardState::default(),
        Action::Unknown => {}
    }
}
