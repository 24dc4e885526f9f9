//! Persistence gateway.
//!
//! Both directions are total: a missing, unreadable, unparseable or
//! inconsistent payload loads as the factory defaults, and a failed write is
//! logged and dropped. `isRunning` is never persisted as true and is always
//! false after a load.

use super::slot::StateSlot;
use crate::state::DashboardState;

pub struct PersistenceGateway<S> {
    slot: S,
}

impl<S: StateSlot> PersistenceGateway<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Rehydrate the dashboard. Never fails.
    pub fn load(&self) -> DashboardState {
        let payload = match self.slot.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("no saved dashboard, starting from defaults");
                return DashboardState::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved dashboard unreadable, using defaults");
                return DashboardState::default();
            }
        };
        decode(&payload).unwrap_or_default()
    }

    /// Persist a copy of `state` with the timer paused. Failures are logged
    /// and dropped; the caller's state stays authoritative.
    pub fn save(&mut self, state: &DashboardState) {
        let payload = match encode(state) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize dashboard, not saved");
                return;
            }
        };
        if let Err(e) = self.slot.write(&payload) {
            tracing::warn!(error = %e, "failed to save dashboard, keeping in-memory state");
        }
    }
}

/// Parse a saved payload. `None` when it is not a dashboard or breaks an
/// invariant.
pub fn decode(payload: &str) -> Option<DashboardState> {
    let mut state: DashboardState = match serde_json::from_str(payload) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "saved dashboard is malformed, using defaults");
            return None;
        }
    };
    if let Some(reason) = state.violation() {
        tracing::warn!(%reason, "saved dashboard is inconsistent, using defaults");
        return None;
    }
    state.timer_state.is_running = false;
    Some(state)
}

/// Serialize the persisted form of `state`.
pub fn encode(state: &DashboardState) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(state)?;
    if let Some(timer) = value.get_mut("timerState").and_then(|t| t.as_object_mut()) {
        timer.insert("isRunning".into(), serde_json::Value::Bool(false));
    }
    serde_json::to_string(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;
    use crate::timer::TimerStatePatch;

    fn running_state() -> DashboardState {
        let mut state = DashboardState::default();
        TimerStatePatch::running(true).apply(&mut state.timer_state);
        state.notes = "draft".into();
        state
    }

    #[test]
    fn save_never_persists_running() {
        let slot = MemorySlot::new();
        let mut gateway = PersistenceGateway::new(slot.clone());
        let state = running_state();
        gateway.save(&state);

        assert!(state.timer_state.is_running);
        let saved: serde_json::Value = serde_json::from_str(&slot.payload().unwrap()).unwrap();
        assert_eq!(saved["timerState"]["isRunning"], false);
        assert_eq!(saved["notes"], "draft");
    }

    #[test]
    fn load_round_trips_with_timer_paused() {
        let slot = MemorySlot::new();
        let mut gateway = PersistenceGateway::new(slot);
        let state = running_state();
        gateway.save(&state);

        let mut expected = state;
        expected.timer_state.is_running = false;
        assert_eq!(gateway.load(), expected);
    }

    #[test]
    fn running_flag_in_payload_is_cleared() {
        let gateway = PersistenceGateway::new(MemorySlot::with_payload(
            r#"{"timerState":{"isRunning":true,"secondsRemaining":42}}"#,
        ));
        let state = gateway.load();
        assert!(!state.timer_state.is_running);
        assert_eq!(state.timer_state.seconds_remaining, 42);
    }

    #[test]
    fn garbage_loads_defaults() {
        for payload in ["not json", "[]", r#"{"tasks":7}"#, r#"{"pinnedNotes":["a","a"]}"#] {
            let gateway = PersistenceGateway::new(MemorySlot::with_payload(payload));
            assert_eq!(gateway.load(), DashboardState::default(), "{payload}");
        }
    }

    #[test]
    fn failed_write_is_swallowed() {
        let slot = MemorySlot::with_payload("{}");
        slot.fail_writes(true);
        let mut gateway = PersistenceGateway::new(slot.clone());
        gateway.save(&running_state());
        assert_eq!(slot.payload().as_deref(), Some("{}"));
    }
}
