use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::date::DateKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(&self) -> bool {
        !matches!(self, TimerMode::Focus)
    }
}

fn default_focus() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}

/// Interval lengths, in minutes, and how many focus sessions earn a long
/// break. All values are positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    #[serde(default = "default_focus", alias = "focus")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break", alias = "shortBreak")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break", alias = "longBreak")]
    pub long_break_minutes: u32,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl TimerSettings {
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode).saturating_mul(60)
    }

    pub fn is_valid(&self) -> bool {
        self.focus_minutes > 0
            && self.short_break_minutes > 0
            && self.long_break_minutes > 0
            && self.long_break_interval > 0
    }
}

/// Partial settings update. Zero values are ignored when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none", alias = "focus")]
    pub focus_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "shortBreak")]
    pub short_break_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "longBreak")]
    pub long_break_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_break_interval: Option<u32>,
}

impl TimerSettingsPatch {
    pub fn focus(minutes: u32) -> Self {
        Self {
            focus_minutes: Some(minutes),
            ..Self::default()
        }
    }

    pub fn merged(&self, settings: &TimerSettings) -> TimerSettings {
        let pick = |patch: Option<u32>, current: u32| patch.filter(|v| *v > 0).unwrap_or(current);
        TimerSettings {
            focus_minutes: pick(self.focus_minutes, settings.focus_minutes),
            short_break_minutes: pick(self.short_break_minutes, settings.short_break_minutes),
            long_break_minutes: pick(self.long_break_minutes, settings.long_break_minutes),
            long_break_interval: pick(self.long_break_interval, settings.long_break_interval),
        }
    }
}

/// One finished focus interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSession {
    #[serde(deserialize_with = "crate::date::timestamp::deserialize")]
    pub completed_at: DateTime<Utc>,
    #[serde(alias = "duration")]
    pub duration_minutes: u32,
}

impl CompletedSession {
    /// Whether the session ended on `date` in the calendar of `tz`.
    pub fn completed_on<Tz: TimeZone>(&self, date: DateKey, tz: &Tz) -> bool {
        DateKey::of(&self.completed_at.with_timezone(tz)) == date
    }
}

/// Countdown state. `is_running` is session-only: it is cleared on load and
/// in every persisted copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerState {
    pub mode: TimerMode,
    pub is_running: bool,
    pub seconds_remaining: u32,
    pub session_count: u32,
    pub completed_sessions: Vec<CompletedSession>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            mode: TimerMode::Focus,
            is_running: false,
            seconds_remaining: TimerSettings::default().seconds_for(TimerMode::Focus),
            session_count: 0,
            completed_sessions: Vec::new(),
        }
    }
}

impl TimerState {
    /// Focus sessions completed on `date` as seen in `tz`.
    pub fn sessions_on<Tz: TimeZone>(&self, date: DateKey, tz: &Tz) -> usize {
        self.completed_sessions
            .iter()
            .filter(|s| s.completed_on(date, tz))
            .count()
    }

    pub fn focus_minutes_on<Tz: TimeZone>(&self, date: DateKey, tz: &Tz) -> u32 {
        self.completed_sessions
            .iter()
            .filter(|s| s.completed_on(date, tz))
            .map(|s| s.duration_minutes)
            .sum()
    }
}

/// Shallow patch over [`TimerState`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_sessions: Option<Vec<CompletedSession>>,
}

impl TimerStatePatch {
    pub fn running(is_running: bool) -> Self {
        Self {
            is_running: Some(is_running),
            ..Self::default()
        }
    }

    pub fn apply(&self, state: &mut TimerState) {
        if let Some(mode) = self.mode {
            state.mode = mode;
        }
        if let Some(is_running) = self.is_running {
            state.is_running = is_running;
        }
        if let Some(seconds) = self.seconds_remaining {
            state.seconds_remaining = seconds;
        }
        if let Some(count) = self.session_count {
            state.session_count = count;
        }
        if let Some(sessions) = &self.completed_sessions {
            state.completed_sessions = sessions.clone();
        }
    }
}
