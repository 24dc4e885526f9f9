//! The store: current state, dispatch, persistence.

use chrono::{DateTime, Utc};

use crate::action::Action;
use crate::events::Event;
use crate::reducer::transition;
use crate::state::DashboardState;
use crate::storage::{PersistenceGateway, StateSlot};
use crate::timer::engine;

/// Owns the dashboard state. Every change goes through [`Store::dispatch`],
/// which runs the reducer, commits the result and saves it when it differs
/// from the previous state.
pub struct Store<S: StateSlot> {
    state: DashboardState,
    gateway: PersistenceGateway<S>,
}

impl<S: StateSlot> Store<S> {
    /// Rehydrate from the gateway's slot.
    pub fn open(gateway: PersistenceGateway<S>) -> Self {
        let state = gateway.load();
        tracing::debug!(
            tasks = state.tasks.len(),
            habits = state.habits.len(),
            blocks = state.schedule_blocks.len(),
            "dashboard loaded"
        );
        Self { state, gateway }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Owned copy of the committed state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.clone()
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn dispatch(&mut self, action: Action) -> &DashboardState {
        let next = transition(&self.state, &action);
        let changed = next != self.state;
        if action.is_timer_patch() {
            tracing::trace!(action = action.tag(), changed, "dispatch");
        } else {
            tracing::debug!(action = action.tag(), changed, "dispatch");
        }
        if changed {
            self.state = next;
            self.gateway.save(&self.state);
        }
        &self.state
    }

    /// Advance a running timer by one second. Returns the completion event
    /// when a phase ran out.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let tick = engine::tick(
            &self.state.timer_state,
            &self.state.timer_settings,
            now,
        )?;
        self.dispatch(Action::SetTimerState { patch: tick.patch });
        tick.completed
    }
}
