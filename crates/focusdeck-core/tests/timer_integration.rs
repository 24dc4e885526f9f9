//! Integration tests for the timer: engine laws through the store, and the
//! runtime's scheduler handling with manual and tokio tickers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use focusdeck_core::storage::{MemorySlot, PersistenceGateway};
use focusdeck_core::timer::FixedClock;
use focusdeck_core::{
    Action, CompletionSignal, Dashboard, Event, ManualTicker, Store, TickScheduler, TimerMode,
    TimerSettingsPatch, TimerStatePatch, TokioTicker,
};
use proptest::prelude::*;

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl CompletionSignal for Recorder {
    fn notify(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn memory_store() -> Store<MemorySlot> {
    Store::open(PersistenceGateway::new(MemorySlot::new()))
}

fn short_settings(store: &mut Store<MemorySlot>) {
    store.dispatch(Action::UpdateTimerSettings {
        settings: TimerSettingsPatch {
            focus_minutes: Some(1),
            short_break_minutes: Some(1),
            long_break_minutes: Some(2),
            long_break_interval: Some(4),
        },
    });
}

#[test]
fn test_settings_change_resets_focus_countdown() {
    let mut store = memory_store();
    let state = store.dispatch(Action::UpdateTimerSettings {
        settings: TimerSettingsPatch::focus(30),
    });
    assert_eq!(state.timer_state.seconds_remaining, 1800);
    assert!(!state.timer_state.is_running);
}

#[test]
fn test_long_break_only_on_fourth_completion() {
    let mut store = memory_store();
    short_settings(&mut store);
    store.dispatch(Action::SetTimerState {
        patch: TimerStatePatch::running(true),
    });
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    let mut breaks = Vec::new();
    while breaks.len() < 5 {
        if let Some(Event::PhaseCompleted { from, to, .. }) = store.tick(now) {
            if from == TimerMode::Focus {
                breaks.push(to);
            }
        }
    }
    assert_eq!(
        breaks,
        [
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::LongBreak,
            TimerMode::ShortBreak,
        ]
    );
    let timer = &store.state().timer_state;
    assert_eq!(timer.session_count, 5);
    assert_eq!(timer.completed_sessions.len(), 5);
    assert!(timer.is_running);
}

#[test]
fn test_pause_cancels_and_later_ticks_do_nothing() {
    let ticker = ManualTicker::new();
    let mut dash = Dashboard::new(memory_store(), ticker.clone());

    dash.start_timer();
    assert_eq!(ticker.fire_n(10), 10);
    dash.pause_timer();
    assert_eq!(ticker.cancels(), 1);

    let frozen = dash.snapshot();
    assert_eq!(frozen.timer_state.seconds_remaining, 1490);
    assert_eq!(ticker.fire_n(10), 0);
    assert_eq!(dash.snapshot(), frozen);
}

#[test]
fn test_settings_change_cancels_ticking() {
    let ticker = ManualTicker::new();
    let mut dash = Dashboard::new(memory_store(), ticker.clone());

    dash.start_timer();
    ticker.fire_n(5);
    let state = dash.update_timer_settings(TimerSettingsPatch::focus(45));
    assert!(!state.timer_state.is_running);
    assert_eq!(state.timer_state.seconds_remaining, 45 * 60);
    assert!(!dash.is_ticking());
    assert_eq!(ticker.fire_n(3), 0);
}

#[test]
fn test_drop_cancels_ticking() {
    let ticker = ManualTicker::new();
    {
        let mut dash = Dashboard::new(memory_store(), ticker.clone());
        dash.start_timer();
        assert!(ticker.is_active());
    }
    assert_eq!(ticker.fire_n(1), 0);
}

#[test]
fn test_completion_reaches_signal_with_clock_time() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
    let recorder = Arc::new(Recorder::default());
    let ticker = ManualTicker::new();
    let mut store = memory_store();
    store.dispatch(Action::SetTimerState {
        patch: TimerStatePatch {
            seconds_remaining: Some(2),
            ..TimerStatePatch::default()
        },
    });
    let mut dash = Dashboard::new(store, ticker.clone())
        .with_clock(Arc::new(FixedClock::new(at)))
        .with_signal(recorder.clone());

    dash.start_timer();
    ticker.fire_n(3);

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        [Event::PhaseCompleted {
            from: TimerMode::Focus,
            to: TimerMode::ShortBreak,
            session_count: 1,
            at,
        }]
    );
    assert_eq!(dash.snapshot().timer_state.completed_sessions[0].completed_at, at);
    assert!(dash.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_runtime_ticks_until_paused() {
    let ticker = TokioTicker::try_current().unwrap();
    let mut dash = Dashboard::new(memory_store(), ticker);

    dash.start_timer();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(dash.snapshot().timer_state.seconds_remaining, 1495);

    dash.pause_timer();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(dash.snapshot().timer_state.seconds_remaining, 1495);
    assert!(!dash.is_ticking());
}

proptest! {
    #[test]
    fn prop_focus_exhaustion_law(count in 0u32..50, interval in 1u32..8) {
        let mut store = memory_store();
        store.dispatch(Action::UpdateTimerSettings {
            settings: TimerSettingsPatch {
                long_break_interval: Some(interval),
                ..TimerSettingsPatch::default()
            },
        });
        store.dispatch(Action::SetTimerState {
            patch: TimerStatePatch {
                is_running: Some(true),
                seconds_remaining: Some(0),
                session_count: Some(count),
                ..TimerStatePatch::default()
            },
        });
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        store.tick(now);

        let timer = &store.state().timer_state;
        let expected = if (count + 1) % interval == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        };
        prop_assert_eq!(timer.mode, expected);
        prop_assert_eq!(timer.session_count, count + 1);
        prop_assert_eq!(timer.completed_sessions.len(), 1);
        prop_assert!(timer.is_running);
    }
}
