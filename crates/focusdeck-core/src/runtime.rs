//! Dashboard runtime: a [`Store`] wired to a tick scheduler, a clock and a
//! completion signal.
//!
//! User dispatches and timer ticks share one lock around the store, so no
//! two transitions ever run at once. After every dispatch the scheduler is
//! reconciled with `isRunning`: started when the timer runs and nothing is
//! scheduled, cancelled when it is paused. Dropping the runtime cancels the
//! scheduler.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::action::Action;
use crate::events::{CompletionSignal, Event, LogSignal};
use crate::state::DashboardState;
use crate::storage::StateSlot;
use crate::store::Store;
use crate::timer::{
    engine, Clock, SystemClock, TickScheduler, TimerSettingsPatch, TimerStatePatch,
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

type SharedStore<S> = Arc<Mutex<Store<S>>>;

fn lock<S: StateSlot>(store: &Mutex<Store<S>>) -> MutexGuard<'_, Store<S>> {
    store.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct Dashboard<S: StateSlot + 'static, T: TickScheduler> {
    store: SharedStore<S>,
    ticker: T,
    clock: Arc<dyn Clock>,
    signal: Arc<dyn CompletionSignal>,
    interval: Duration,
}

impl<S: StateSlot + 'static, T: TickScheduler> Dashboard<S, T> {
    pub fn new(store: Store<S>, ticker: T) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            ticker,
            clock: Arc::new(SystemClock),
            signal: Arc::new(LogSignal),
            interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_signal(mut self, signal: Arc<dyn CompletionSignal>) -> Self {
        self.signal = signal;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn snapshot(&self) -> DashboardState {
        lock(&self.store).snapshot()
    }

    /// Whether the tick scheduler is currently armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Dispatch a user action and return the committed state.
    pub fn dispatch(&mut self, action: Action) -> DashboardState {
        let snapshot = lock(&self.store).dispatch(action).clone();
        self.sync_ticker(snapshot.timer_state.is_running);
        snapshot
    }

    pub fn start_timer(&mut self) -> Event {
        self.timer_command(engine::start())
    }

    pub fn pause_timer(&mut self) -> Event {
        self.timer_command(engine::pause())
    }

    pub fn toggle_timer(&mut self) -> Event {
        let patch = engine::toggle(&lock(&self.store).state().timer_state);
        self.timer_command(patch)
    }

    pub fn reset_timer(&mut self) -> Event {
        let patch = engine::reset(&lock(&self.store).state().timer_settings);
        self.dispatch(Action::SetTimerState { patch });
        Event::TimerReset {
            at: self.clock.now(),
        }
    }

    /// Merge new interval lengths; this pauses the timer.
    pub fn update_timer_settings(&mut self, settings: TimerSettingsPatch) -> DashboardState {
        self.dispatch(Action::UpdateTimerSettings { settings })
    }

    fn timer_command(&mut self, patch: TimerStatePatch) -> Event {
        let state = self.dispatch(Action::SetTimerState { patch });
        let timer = state.timer_state;
        let at = self.clock.now();
        if timer.is_running {
            Event::TimerStarted {
                mode: timer.mode,
                seconds_remaining: timer.seconds_remaining,
                at,
            }
        } else {
            Event::TimerPaused {
                mode: timer.mode,
                seconds_remaining: timer.seconds_remaining,
                at,
            }
        }
    }

    fn sync_ticker(&mut self, running: bool) {
        match (running, self.ticker.is_active()) {
            (true, false) => {
                let store = Arc::clone(&self.store);
                let clock = Arc::clone(&self.clock);
                let signal = Arc::clone(&self.signal);
                self.ticker.start(
                    self.interval,
                    Box::new(move || {
                        let completed = {
                            let mut store = lock(&store);
                            // A pause may have landed between the tick firing
                            // and taking the lock.
                            if !store.state().timer_state.is_running {
                                return;
                            }
                            store.tick(clock.now())
                        };
                        if let Some(event) = completed {
                            signal.notify(&event);
                        }
                    }),
                );
                tracing::info!(interval = ?self.interval, "timer ticking");
            }
            (false, true) => {
                self.ticker.cancel();
                tracing::info!("timer stopped ticking");
            }
            _ => {}
        }
    }
}

impl<S: StateSlot + 'static, T: TickScheduler> Drop for Dashboard<S, T> {
    fn drop(&mut self) {
        self.ticker.cancel();
    }
}
