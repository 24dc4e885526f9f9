use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focusdeck", version, about = "Focusdeck productivity dashboard")]
struct Cli {
    /// Data directory (defaults to ~/.config/focusdeck, or focusdeck-dev
    /// when FOCUSDECK_ENV=dev)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Whole-dashboard operations
    State {
        #[command(subcommand)]
        action: commands::state::StateAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Notes and pinned snippets
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Daily planning prompts
    Prompt {
        #[command(subcommand)]
        action: commands::prompt::PromptAction,
    },
    /// Mood check-ins
    Mood {
        #[command(subcommand)]
        action: commands::prompt::MoodAction,
    },
    /// Time-blocked schedule
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Dispatch a raw JSON action, e.g. '{"type":"PIN_NOTE","text":"hi"}'
    Dispatch {
        /// Action as JSON
        json: String,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "focusdeck", &mut std::io::stdout());
        return;
    }

    let result = common::Context::open(cli.data_dir).and_then(|ctx| {
        common::init_logging(&ctx.config.logging.level);
        match cli.command {
            Commands::State { action } => commands::state::run(&ctx, action),
            Commands::Task { action } => commands::task::run(&ctx, action),
            Commands::Habit { action } => commands::habit::run(&ctx, action),
            Commands::Note { action } => commands::note::run(&ctx, action),
            Commands::Prompt { action } => commands::prompt::run(&ctx, action),
            Commands::Mood { action } => commands::prompt::run_mood(&ctx, action),
            Commands::Schedule { action } => commands::schedule::run(&ctx, action),
            Commands::Timer { action } => commands::timer::run(&ctx, action),
            Commands::Config { action } => commands::config::run(&ctx, action),
            Commands::Dispatch { json } => commands::state::dispatch_json(&ctx, &json),
            Commands::Completions { .. } => Ok(()),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
