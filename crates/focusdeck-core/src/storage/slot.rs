use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;

/// One named durable entry holding the serialized dashboard.
pub trait StateSlot: Send {
    /// The stored payload, or `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, StorageError>;

    fn write(&mut self, payload: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    payload: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory slot for tests. Clones share the same entry, so a test can
/// inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        let slot = Self::default();
        slot.lock().payload = Some(payload.into());
        slot
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn payload(&self) -> Option<String> {
        self.lock().payload.clone()
    }

    /// Make every later write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }
}

impl StateSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload())
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StorageError::WriteFailed {
                key: "memory".into(),
                message: "simulated write failure".into(),
            });
        }
        inner.payload = Some(payload.to_string());
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_payload() {
        let mut slot = MemorySlot::new();
        let view = slot.clone();
        assert!(slot.read().unwrap().is_none());
        slot.write("{}").unwrap();
        assert_eq!(view.payload().as_deref(), Some("{}"));
        assert_eq!(view.writes(), 1);
    }

    #[test]
    fn simulated_failure_keeps_old_payload() {
        let mut slot = MemorySlot::with_payload("old");
        slot.fail_writes(true);
        assert!(matches!(slot.write("new"), Err(StorageError::WriteFailed { .. })));
        assert_eq!(slot.payload().as_deref(), Some("old"));
        assert_eq!(slot.writes(), 0);
    }
}
