use clap::Subcommand;
use focusdeck_core::Action;

use crate::common::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the whole dashboard as JSON
    Show,
    /// Restore factory defaults
    Reset,
}

pub fn run(ctx: &Context, action: StateAction) -> CliResult {
    match action {
        StateAction::Show => {
            let store = ctx.open_store()?;
            print_json(store.state())?;
        }
        StateAction::Reset => {
            let state = ctx.dispatch(Action::ResetState)?;
            print_json(&state)?;
        }
    }
    Ok(())
}

/// Dispatch an action given as JSON. Unknown action types are accepted and
/// change nothing.
pub fn dispatch_json(ctx: &Context, json: &str) -> CliResult {
    let action: Action = serde_json::from_str(json)?;
    if action == Action::Unknown {
        tracing::warn!("unrecognized action type, state unchanged");
    }
    let state = ctx.dispatch(action)?;
    print_json(&state)
}
