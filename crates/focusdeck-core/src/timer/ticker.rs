//! Periodic tick scheduling.
//!
//! [`TickScheduler`] is the port the runtime uses to fire the timer once per
//! elapsed second. [`TokioTicker`] drives it from a tokio interval;
//! [`ManualTicker`] fires only when told to, for deterministic tests.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

pub trait TickScheduler: Send {
    /// Fire `on_tick` every `interval` until cancelled. Starting an active
    /// scheduler replaces the previous callback.
    fn start(&mut self, interval: Duration, on_tick: TickCallback);

    /// Stop firing. The pending callback is dropped.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Tick scheduler backed by a spawned tokio task. Each callback runs on the
/// blocking pool, one at a time.
pub struct TokioTicker {
    runtime: Handle,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime, task: None }
    }

    /// Scheduler on the runtime the caller is running in, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl TickScheduler for TokioTicker {
    fn start(&mut self, interval: Duration, on_tick: TickCallback) {
        self.cancel();
        self.task = Some(self.runtime.spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticks.tick().await;
            let mut on_tick = Some(on_tick);
            while let Some(mut callback) = on_tick.take() {
                ticks.tick().await;
                // The callback locks the store and writes to disk; keep that
                // off the async workers. The next tick waits for it.
                match tokio::task::spawn_blocking(move || {
                    callback();
                    callback
                })
                .await
                {
                    Ok(callback) => on_tick = Some(callback),
                    Err(e) => tracing::error!(error = %e, "tick callback failed"),
                }
            }
        }));
        tracing::debug!(?interval, "tick scheduler started");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("tick scheduler cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Default)]
struct ManualState {
    callback: Option<TickCallback>,
    interval: Option<Duration>,
    generation: u64,
    starts: usize,
    cancels: usize,
}

/// Scheduler that fires only on [`ManualTicker::fire`]. Clones share state,
/// so a test can keep one handle while the runtime owns another.
#[derive(Clone, Default)]
pub struct ManualTicker {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run the callback once. Returns false when nothing is scheduled.
    pub fn fire(&self) -> bool {
        let (mut callback, generation) = {
            let mut state = self.lock();
            match state.callback.take() {
                Some(cb) => (cb, state.generation),
                None => return false,
            }
        };
        callback();
        let mut state = self.lock();
        if state.generation == generation && state.callback.is_none() {
            state.callback = Some(callback);
        }
        true
    }

    /// Fire `n` times; returns how many actually ran.
    pub fn fire_n(&self, n: usize) -> usize {
        (0..n).take_while(|_| self.fire()).count()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.lock().interval
    }

    pub fn starts(&self) -> usize {
        self.lock().starts
    }

    pub fn cancels(&self) -> usize {
        self.lock().cancels
    }
}

impl TickScheduler for ManualTicker {
    fn start(&mut self, interval: Duration, on_tick: TickCallback) {
        let mut state = self.lock();
        state.generation += 1;
        state.callback = Some(on_tick);
        state.interval = Some(interval);
        state.starts += 1;
    }

    fn cancel(&mut self) {
        let mut state = self.lock();
        if state.interval.take().is_some() {
            state.generation += 1;
            state.callback = None;
            state.cancels += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.lock().interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, Box::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn manual_ticker_fires_until_cancelled() {
        let mut ticker = ManualTicker::new();
        let handle = ticker.clone();
        let (count, cb) = counter();

        assert!(!handle.fire());
        ticker.start(Duration::from_secs(1), cb);
        assert!(ticker.is_active());
        assert_eq!(handle.fire_n(3), 3);
        ticker.cancel();
        assert!(!ticker.is_active());
        assert_eq!(handle.fire_n(3), 0);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(handle.cancels(), 1);
    }

    #[test]
    fn restart_replaces_callback() {
        let mut ticker = ManualTicker::new();
        let (first, cb1) = counter();
        let (second, cb2) = counter();
        ticker.start(Duration::from_secs(1), cb1);
        ticker.start(Duration::from_secs(1), cb2);
        ticker.fire();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(ticker.starts(), 2);
    }

    #[tokio::test]
    async fn tokio_ticker_blocking_callback_leaves_runtime_free() {
        let mut ticker = TokioTicker::try_current().unwrap();
        let (entered_tx, entered_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        ticker.start(
            Duration::from_millis(10),
            Box::new(move || {
                let _ = entered_tx.send(());
                let _ = release_rx.recv();
            }),
        );

        // Single-threaded runtime: these sleeps only complete if the blocked
        // callback is not holding the runtime thread.
        let mut waited = 0;
        while entered_rx.try_recv().is_err() {
            assert!(waited < 200, "callback never ran");
            tokio::time::sleep(Duration::from_millis(5)).await;
            waited += 1;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(ticker.is_active());

        ticker.cancel();
        drop(release_tx);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_fires_on_interval_and_stops_on_cancel() {
        let mut ticker = TokioTicker::try_current().unwrap();
        let (count, cb) = counter();
        ticker.start(Duration::from_secs(1), cb);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        ticker.cancel();
        assert!(!ticker.is_active());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
