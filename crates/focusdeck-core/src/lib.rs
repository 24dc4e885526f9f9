//! # Focusdeck Core Library
//!
//! This library provides the core logic for focusdeck, a single-user
//! productivity dashboard: tasks, a time-blocked schedule, habits, notes,
//! planning prompts, mood check-ins and a focus-interval timer. It follows a
//! CLI-first philosophy: every operation is reachable from the standalone
//! `focusdeck` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Reducer**: one pure transition function, `(state, action) -> state`,
//!   is the only way state changes
//! - **Timer Engine**: a state machine advanced by periodic ticks; it talks to
//!   the reducer through `SET_TIMER_STATE` patches like any other caller
//! - **Store**: owns the current state, runs the reducer, persists changes
//! - **Storage**: the persistence gateway over a durable key-value slot
//!   (SQLite) and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DashboardState`]: the aggregate root
//! - [`Action`]: every mutation, as data
//! - [`Store`]: serialized dispatch and persistence
//! - [`Dashboard`]: store plus tick scheduler, clock and completion signal
//! - [`PersistenceGateway`]: total load/save over a [`StateSlot`]

/// Implements `FromStr` and `Display` for a unit enum from a text table.
macro_rules! string_enum {
    ($ty:ident, $field:literal, { $($text:literal => $variant:path),+ $(,)? }) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($variant),)+
                    other => Err($crate::error::ValidationError::InvalidValue {
                        field: $field.to_string(),
                        message: format!(
                            "'{}' is not one of: {}",
                            other,
                            [$($text),+].join(", ")
                        ),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let text = match self {
                    $($variant => $text,)+
                };
                f.write_str(text)
            }
        }
    };
}

pub mod action;
pub mod date;
pub mod error;
pub mod events;
pub mod habit;
pub mod notes;
pub mod planning;
pub mod reducer;
pub mod runtime;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod store;
pub mod task;
pub mod timer;
pub mod validation;

pub use action::Action;
pub use date::{DateKey, TimeOfDay};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{CompletionSignal, Event, LogSignal};
pub use habit::{Habit, HabitLog};
pub use planning::{Mood, Prompt};
pub use reducer::transition;
pub use runtime::Dashboard;
pub use schedule::{BlockPatch, ScheduleBlock};
pub use state::DashboardState;
pub use storage::{Config, Database, MemorySlot, PersistenceGateway, SqliteSlot, StateSlot};
pub use store::Store;
pub use task::{Bucket, EnergyLevel, Priority, Subtask, Task, TaskFilter, TaskPatch};
pub use timer::{
    Clock, ManualTicker, SystemClock, TickScheduler, TimerMode, TimerSettings,
    TimerSettingsPatch, TimerState, TimerStatePatch, TokioTicker,
};
