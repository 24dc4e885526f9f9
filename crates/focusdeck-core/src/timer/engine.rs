//! Timer engine.
//!
//! A Mealy machine over [`TimerState`]: every input (start, pause, reset,
//! tick) yields a [`TimerStatePatch`] that the caller dispatches as
//! `SET_TIMER_STATE`, plus, on countdown exhaustion, an [`Event`] for the
//! completion signal. The engine holds no state of its own and never reads
//! the clock; `now` is passed in.
//!
//! ## Transitions
//!
//! ```text
//! focus --(exhausted, n % interval != 0)--> short-break --(exhausted)--> focus
//! focus --(exhausted, n % interval == 0)--> long-break  --(exhausted)--> focus
//! ```
//!
//! Breaks and the following focus interval start on their own: `is_running`
//! stays true across phase changes.

use chrono::{DateTime, Utc};

use super::state::{CompletedSession, TimerMode, TimerSettings, TimerState, TimerStatePatch};
use crate::events::Event;

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub patch: TimerStatePatch,
    pub completed: Option<Event>,
}

pub fn start() -> TimerStatePatch {
    TimerStatePatch::running(true)
}

pub fn pause() -> TimerStatePatch {
    TimerStatePatch::running(false)
}

/// Start/pause toggle; no field other than `is_running` changes.
pub fn toggle(state: &TimerState) -> TimerStatePatch {
    TimerStatePatch::running(!state.is_running)
}

/// Back to a fresh, paused focus interval with no recorded sessions.
pub fn reset(settings: &TimerSettings) -> TimerStatePatch {
    TimerStatePatch {
        mode: Some(TimerMode::Focus),
        is_running: Some(false),
        seconds_remaining: Some(settings.seconds_for(TimerMode::Focus)),
        session_count: Some(0),
        completed_sessions: Some(Vec::new()),
    }
}

/// Advance one second. Returns `None` for a paused timer.
pub fn tick(state: &TimerState, settings: &TimerSettings, now: DateTime<Utc>) -> Option<Tick> {
    if !state.is_running {
        return None;
    }

    if state.seconds_remaining > 0 {
        return Some(Tick {
            patch: TimerStatePatch {
                seconds_remaining: Some(state.seconds_remaining - 1),
                ..TimerStatePatch::default()
            },
            completed: None,
        });
    }

    let (next_mode, session_count, completed_sessions) = match state.mode {
        TimerMode::Focus => {
            let count = state.session_count.saturating_add(1);
            let mut sessions = state.completed_sessions.clone();
            sessions.push(CompletedSession {
                completed_at: now,
                duration_minutes: settings.focus_minutes,
            });
            // An interval of 0 only gets here by skipping validation.
            let interval = settings.long_break_interval.max(1);
            let mode = if count % interval == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            };
            (mode, count, Some(sessions))
        }
        TimerMode::ShortBreak | TimerMode::LongBreak => {
            (TimerMode::Focus, state.session_count, None)
        }
    };

    Some(Tick {
        patch: TimerStatePatch {
            mode: Some(next_mode),
            is_running: Some(true),
            seconds_remaining: Some(settings.seconds_for(next_mode)),
            session_count: Some(session_count),
            completed_sessions,
        },
        completed: Some(Event::PhaseCompleted {
            from: state.mode,
            to: next_mode,
            session_count,
            at: now,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn running(mode: TimerMode, seconds: u32, sessions: u32) -> TimerState {
        TimerState {
            mode,
            is_running: true,
            seconds_remaining: seconds,
            session_count: sessions,
            completed_sessions: Vec::new(),
        }
    }

    fn applied(state: &TimerState, patch: &TimerStatePatch) -> TimerState {
        let mut next = state.clone();
        patch.apply(&mut next);
        next
    }

    #[test]
    fn paused_timer_does_not_tick() {
        let state = TimerState::default();
        assert!(tick(&state, &TimerSettings::default(), now()).is_none());
    }

    #[test]
    fn tick_decrements_only_seconds() {
        let state = running(TimerMode::Focus, 10, 2);
        let out = tick(&state, &TimerSettings::default(), now()).unwrap();
        let next = applied(&state, &out.patch);
        assert_eq!(next.seconds_remaining, 9);
        assert_eq!(next.mode, TimerMode::Focus);
        assert_eq!(next.session_count, 2);
        assert!(out.completed.is_none());
    }

    #[test]
    fn exhausted_focus_starts_short_break() {
        let state = running(TimerMode::Focus, 0, 0);
        let out = tick(&state, &TimerSettings::default(), now()).unwrap();
        let next = applied(&state, &out.patch);
        assert_eq!(next.mode, TimerMode::ShortBreak);
        assert_eq!(next.seconds_remaining, 5 * 60);
        assert_eq!(next.session_count, 1);
        assert!(next.is_running);
        assert_eq!(
            next.completed_sessions,
            vec![CompletedSession { completed_at: now(), duration_minutes: 25 }]
        );
        assert!(matches!(
            out.completed,
            Some(Event::PhaseCompleted { from: TimerMode::Focus, to: TimerMode::ShortBreak, session_count: 1, .. })
        ));
    }

    #[test]
    fn every_interval_th_session_earns_long_break() {
        let state = running(TimerMode::Focus, 0, 3);
        let next = applied(&state, &tick(&state, &TimerSettings::default(), now()).unwrap().patch);
        assert_eq!(next.mode, TimerMode::LongBreak);
        assert_eq!(next.seconds_remaining, 15 * 60);
        assert_eq!(next.session_count, 4);
    }

    #[test]
    fn exhausted_break_returns_to_focus_keeping_count() {
        for mode in [TimerMode::ShortBreak, TimerMode::LongBreak] {
            let state = running(mode, 0, 4);
            let out = tick(&state, &TimerSettings::default(), now()).unwrap();
            let next = applied(&state, &out.patch);
            assert_eq!(next.mode, TimerMode::Focus);
            assert_eq!(next.seconds_remaining, 25 * 60);
            assert_eq!(next.session_count, 4);
            assert!(next.is_running);
            assert!(next.completed_sessions.is_empty());
        }
    }

    #[test]
    fn zero_interval_is_treated_as_one() {
        let settings = TimerSettings { long_break_interval: 0, ..TimerSettings::default() };
        let state = running(TimerMode::Focus, 0, 0);
        let next = applied(&state, &tick(&state, &settings, now()).unwrap().patch);
        assert_eq!(next.mode, TimerMode::LongBreak);
    }

    #[test]
    fn reset_clears_sessions() {
        let mut state = running(TimerMode::LongBreak, 12, 7);
        state.completed_sessions.push(CompletedSession { completed_at: now(), duration_minutes: 25 });
        let next = applied(&state, &reset(&TimerSettings::default()));
        assert_eq!(next, TimerState::default());
    }

    #[test]
    fn toggle_flips_running_only() {
        let state = running(TimerMode::ShortBreak, 42, 1);
        let next = applied(&state, &toggle(&state));
        assert!(!next.is_running);
        assert_eq!(next.seconds_remaining, 42);
        assert_eq!(applied(&next, &toggle(&next)), state);
    }
}
