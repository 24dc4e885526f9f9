use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Side-channel notifications from the timer. These never feed back into
/// state; the state change itself travels as an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A countdown ran out and the next phase started on its own.
    PhaseCompleted {
        from: TimerMode,
        to: TimerMode,
        session_count: u32,
        at: DateTime<Utc>,
    },
}

/// Receives completion signals (a chime, a notification, a log line).
pub trait CompletionSignal: Send + Sync {
    fn notify(&self, event: &Event);
}

/// Signal sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSignal;

impl CompletionSignal for LogSignal {
    fn notify(&self, event: &Event) {
        tracing::info!(?event, "timer phase completed");
    }
}
