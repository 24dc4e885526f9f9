use clap::Subcommand;
use focusdeck_core::habit::is_checked;
use focusdeck_core::validation;
use focusdeck_core::{Action, DashboardState, DateKey, Habit};
use serde::Serialize;

use crate::common::{date_or_today, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Track a new habit
    Add { name: String },
    /// Stop tracking a habit (its log entries are kept)
    Rm { id: String },
    /// Check or uncheck a habit for a day
    Toggle {
        id: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Habits with their streaks and the day's checks
    List {
        #[arg(long)]
        date: Option<DateKey>,
    },
}

#[derive(Serialize)]
struct HabitDay<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    checked: bool,
}

fn print_day(state: &DashboardState, date: DateKey) -> CliResult {
    let habits: Vec<_> = state
        .habits
        .iter()
        .map(|habit| HabitDay {
            habit,
            checked: is_checked(&state.habit_log, &date, &habit.id),
        })
        .collect();
    print_json(&serde_json::json!({ "date": date, "habits": habits }))
}

pub fn run(ctx: &Context, action: HabitAction) -> CliResult {
    match action {
        HabitAction::Add { name } => {
            let habit = Habit::new(validation::title("name", &name)?);
            let state = ctx.dispatch(Action::AddHabit { habit })?;
            print_json(&state.habits)?;
        }
        HabitAction::Rm { id } => {
            let state = ctx.dispatch(Action::RemoveHabit { id })?;
            print_json(&state.habits)?;
        }
        HabitAction::Toggle { id, date } => {
            let date = date_or_today(date);
            let state = ctx.dispatch(Action::ToggleHabit { date, habit_id: id })?;
            print_day(&state, date)?;
        }
        HabitAction::List { date } => {
            let store = ctx.open_store()?;
            print_day(store.state(), date_or_today(date))?;
        }
    }
    Ok(())
}
