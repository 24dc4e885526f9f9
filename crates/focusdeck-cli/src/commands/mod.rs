pub mod config;
pub mod habit;
pub mod note;
pub mod prompt;
pub mod schedule;
pub mod state;
pub mod task;
pub mod timer;
