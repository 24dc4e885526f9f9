use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use focusdeck_core::timer::engine;
use focusdeck_core::validation;
use focusdeck_core::{
    Action, CompletionSignal, Dashboard, Event, TimerSettingsPatch, TokioTicker,
};

use crate::common::{date_or_today, now, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground until Ctrl-C (or --ticks ticks)
    #[command(alias = "run")]
    Start {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u32>,
    },
    /// Pause the timer
    Pause,
    /// Back to a fresh focus interval, clearing all completed sessions
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Change interval lengths (pauses and restarts the countdown)
    Settings {
        /// Focus minutes
        #[arg(long)]
        focus: Option<u32>,
        /// Short break minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Focus sessions per long break
        #[arg(long)]
        interval: Option<u32>,
    },
}

/// Prints phase changes and rings the terminal bell.
struct TerminalSignal {
    chime: bool,
}

impl CompletionSignal for TerminalSignal {
    fn notify(&self, event: &Event) {
        if self.chime {
            eprint!("\x07");
            let _ = std::io::stderr().flush();
        }
        match serde_json::to_string(event) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "failed to print timer event"),
        }
    }
}

fn print_status(state: &focusdeck_core::DashboardState) -> CliResult {
    let today = date_or_today(None);
    print_json(&serde_json::json!({
        "timerState": state.timer_state,
        "timerSettings": state.timer_settings,
        "sessionsToday": state.timer_state.sessions_on(today, &Local),
        "focusMinutesToday": state.timer_state.focus_minutes_on(today, &Local),
    }))
}

/// How long to run for `ticks` ticks, with half an interval of slack.
fn run_duration(interval: Duration, ticks: u32) -> Duration {
    interval
        .saturating_mul(ticks)
        .saturating_add(interval / 2)
}

fn run_foreground(ctx: &Context, ticks: Option<u32>) -> CliResult {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let interval = ctx.config.tick_interval();
    let mut dash = Dashboard::new(ctx.open_store()?, TokioTicker::new(runtime.handle().clone()))
        .with_interval(interval)
        .with_signal(Arc::new(TerminalSignal {
            chime: ctx.config.timer.chime,
        }));

    print_json(&dash.start_timer())?;
    runtime.block_on(async {
        match ticks {
            Some(n) => {
                let wait = run_duration(interval, n);
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            None => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    });
    let paused = dash.pause_timer();
    drop(dash);
    print_json(&paused)
}

pub fn run(ctx: &Context, action: TimerAction) -> CliResult {
    match action {
        TimerAction::Start { ticks } => run_foreground(ctx, ticks)?,
        TimerAction::Pause => {
            let state = ctx.dispatch(Action::SetTimerState {
                patch: engine::pause(),
            })?;
            print_json(&Event::TimerPaused {
                mode: state.timer_state.mode,
                seconds_remaining: state.timer_state.seconds_remaining,
                at: now(),
            })?;
        }
        TimerAction::Reset => {
            let store = ctx.open_store()?;
            let patch = engine::reset(&store.state().timer_settings);
            drop(store);
            ctx.dispatch(Action::SetTimerState { patch })?;
            print_json(&Event::TimerReset { at: now() })?;
        }
        TimerAction::Status => {
            let store = ctx.open_store()?;
            print_status(store.state())?;
        }
        TimerAction::Settings {
            focus,
            short_break,
            long_break,
            interval,
        } => {
            let settings = TimerSettingsPatch {
                focus_minutes: focus,
                short_break_minutes: short_break,
                long_break_minutes: long_break,
                long_break_interval: interval,
            };
            validation::timer_settings_patch(&settings)?;
            let state = ctx.dispatch(Action::UpdateTimerSettings { settings })?;
            print_status(&state)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_duration_adds_half_a_tick() {
        let wait = run_duration(Duration::from_millis(20), 3);
        assert_eq!(wait, Duration::from_millis(70));
    }

    #[test]
    fn run_duration_saturates() {
        let huge = Duration::from_millis(u64::MAX);
        assert_eq!(run_duration(huge, u32::MAX), Duration::MAX);
        let bounded = Duration::from_millis(focusdeck_core::storage::MAX_TICK_INTERVAL_MS);
        assert!(run_duration(bounded, u32::MAX) > bounded);
    }
}
