use clap::Subcommand;
use focusdeck_core::validation;
use focusdeck_core::{Action, DashboardState};

use crate::common::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Replace the note draft
    Set { text: String },
    /// Pin a snippet (most recent first, at most five)
    Pin { text: String },
    /// Remove a pinned snippet
    Unpin { text: String },
    /// Print the draft and the pins
    Show,
}

fn print_notes(state: &DashboardState) -> CliResult {
    print_json(&serde_json::json!({
        "notes": state.notes,
        "pinnedNotes": state.pinned_notes,
    }))
}

pub fn run(ctx: &Context, action: NoteAction) -> CliResult {
    let state = match action {
        NoteAction::Set { text } => ctx.dispatch(Action::SetNotes { text })?,
        NoteAction::Pin { text } => {
            let text = validation::pin_snippet(&text)?.to_string();
            ctx.dispatch(Action::PinNote { text })?
        }
        NoteAction::Unpin { text } => ctx.dispatch(Action::UnpinNote { text })?,
        NoteAction::Show => ctx.open_store()?.snapshot(),
    };
    print_notes(&state)
}
