mod config;
pub mod database;
pub mod gateway;
pub mod slot;

pub use config::{Config, LoggingConfig, StorageConfig, TimerConfig, MAX_TICK_INTERVAL_MS};
pub use database::{Database, SqliteSlot, DEFAULT_SLOT_KEY};
pub use gateway::PersistenceGateway;
pub use slot::{MemorySlot, StateSlot};
