//! Shared plumbing for CLI commands: data directory, config, logging, store.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use focusdeck_core::storage::{PersistenceGateway, SqliteSlot};
use focusdeck_core::{Action, Config, DashboardState, DateKey, Store};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Returns `~/.config/focusdeck[-dev]/` based on FOCUSDECK_ENV.
///
/// Set FOCUSDECK_ENV=dev to use development data directory.
pub fn default_data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSDECK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("focusdeck-dev")
    } else {
        base_dir.join("focusdeck")
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (only possible in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
}

impl Context {
    /// Create the data directory if needed and load its config.
    pub fn open(dir: Option<PathBuf>) -> CliResult<Self> {
        let dir = dir.unwrap_or_else(default_data_dir);
        std::fs::create_dir_all(&dir)?;
        let config = Config::load_from(&Self::config_path_in(&dir))?;
        Ok(Self { dir, config })
    }

    fn config_path_in(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    pub fn config_path(&self) -> PathBuf {
        Self::config_path_in(&self.dir)
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.join(&self.config.storage.database_file)
    }

    pub fn open_store(&self) -> CliResult<Store<SqliteSlot>> {
        let slot = SqliteSlot::open(&self.database_path(), self.config.storage.slot_key.as_str())?;
        Ok(Store::open(PersistenceGateway::new(slot)))
    }

    /// Open the store, dispatch one action and return the committed state.
    pub fn dispatch(&self, action: Action) -> CliResult<DashboardState> {
        let mut store = self.open_store()?;
        Ok(store.dispatch(action).clone())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `date`, or today in local time.
pub fn date_or_today(date: Option<DateKey>) -> DateKey {
    date.unwrap_or_else(|| DateKey::of(&Local::now()))
}
