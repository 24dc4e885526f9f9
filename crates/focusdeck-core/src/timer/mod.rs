pub mod clock;
pub mod engine;
mod state;
pub mod ticker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::Tick;
pub use state::{
    CompletedSession, TimerMode, TimerSettings, TimerSettingsPatch, TimerState, TimerStatePatch,
};
pub use ticker::{ManualTicker, TickCallback, TickScheduler, TokioTicker};
