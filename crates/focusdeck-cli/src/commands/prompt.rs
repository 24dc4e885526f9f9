use clap::Subcommand;
use focusdeck_core::planning::available_dates;
use focusdeck_core::validation;
use focusdeck_core::{Action, DashboardState, DateKey, Mood, Prompt};

use crate::common::{date_or_today, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum PromptAction {
    /// Prompts with the day's answers
    List {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Add a custom prompt
    Add { text: String },
    /// Remove a prompt
    Rm { id: String },
    /// Answer a prompt for a day
    Answer {
        prompt_id: String,
        text: String,
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Days with answers, newest first
    Dates,
}

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record the day's mood: energized, steady, foggy, anxious or low
    Set {
        mood: Mood,
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Remove the day's mood
    Clear {
        #[arg(long)]
        date: Option<DateKey>,
    },
}

fn print_day(state: &DashboardState, date: DateKey) -> CliResult {
    let answers = state.prompt_responses.get(&date);
    let prompts: Vec<_> = state
        .prompts
        .iter()
        .map(|prompt| {
            serde_json::json!({
                "id": prompt.id,
                "text": prompt.text,
                "answer": answers.and_then(|a| a.get(&prompt.id)),
            })
        })
        .collect();
    print_json(&serde_json::json!({
        "date": date,
        "mood": state.mood_checkins.get(&date),
        "prompts": prompts,
    }))
}

pub fn run(ctx: &Context, action: PromptAction) -> CliResult {
    match action {
        PromptAction::List { date } => {
            let store = ctx.open_store()?;
            print_day(store.state(), date_or_today(date))?;
        }
        PromptAction::Add { text } => {
            let prompt = Prompt::new(validation::title("prompt", &text)?);
            let state = ctx.dispatch(Action::AddPrompt { prompt })?;
            print_json(&state.prompts)?;
        }
        PromptAction::Rm { id } => {
            let state = ctx.dispatch(Action::RemovePrompt { id })?;
            print_json(&state.prompts)?;
        }
        PromptAction::Answer {
            prompt_id,
            text,
            date,
        } => {
            let date = date_or_today(date);
            let state = ctx.dispatch(Action::UpdatePromptResponse {
                date,
                prompt_id,
                value: text,
            })?;
            print_day(&state, date)?;
        }
        PromptAction::Dates => {
            let store = ctx.open_store()?;
            let today = date_or_today(None);
            print_json(&available_dates(&store.state().prompt_responses, today))?;
        }
    }
    Ok(())
}

pub fn run_mood(ctx: &Context, action: MoodAction) -> CliResult {
    let (date, mood) = match action {
        MoodAction::Set { mood, date } => (date_or_today(date), Some(mood)),
        MoodAction::Clear { date } => (date_or_today(date), None),
    };
    let state = ctx.dispatch(Action::SetMood { date, mood })?;
    print_day(&state, date)
}
