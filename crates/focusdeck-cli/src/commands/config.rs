use clap::Subcommand;
use focusdeck_core::Config;

use crate::common::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.chime", "storage.slot_key")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = ctx
                .config
                .get(&key)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            let mut entry = serde_json::Map::new();
            entry.insert(key, serde_json::Value::String(value));
            print_json(&entry)?;
        }
        ConfigAction::Set { key, value } => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            config.save_to(&ctx.config_path())?;
            print_json(&config)?;
        }
        ConfigAction::List => {
            let entries: serde_json::Map<String, serde_json::Value> = ctx
                .config
                .entries()
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            print_json(&entries)?;
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save_to(&ctx.config_path())?;
            print_json(&config)?;
        }
    }
    Ok(())
}
