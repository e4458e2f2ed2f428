use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymlog::cli::commands::{self, session::EntryArg};
use gymlog::storage::exercise::ExerciseChanges;

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(version, about = "Track exercises and workout sessions in a local SQLite store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Config file to use instead of the global one")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the store and its tables
    Init,

    /// Manage the exercise catalog
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Record and inspect workout sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// Add an exercise
    Add {
        name: String,
        acronym: String,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// List all exercises
    List,
    /// Change fields of an exercise
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        acronym: Option<String>,
        #[arg(long, short, help = "New description (empty string clears it)")]
        description: Option<String>,
    },
    /// Delete an exercise not used by any session
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Record a session with its exercises
    Record {
        #[arg(long, short, help = "YYYY-MM-DD[ HH:MM:SS] (default: now, UTC)")]
        date: Option<String>,
        #[arg(
            long = "entry",
            short,
            required = true,
            help = "ACRONYM:WEIGHT:REPS:SETS:INTENSITY, repeatable"
        )]
        entries: Vec<String>,
    },
    /// List all sessions
    List,
    /// Show a session with its exercises
    Show { id: i64 },
    /// Move a session to another date
    Update {
        id: i64,
        #[arg(long, short)]
        date: String,
    },
    /// Delete a session and its exercises
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file and store paths
    Path,
    /// Write the default global config file
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mgymlog encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e
                .downcast_ref::<gymlog::GymError>()
                .is_some_and(|err| err.is_contract_violation())
            {
                tracing::error!("Store misuse: {:?}", e);
            }
            gymlog::cli::ui::Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::init::run(config)?,
        Commands::Exercise { action } => match action {
            ExerciseAction::Add {
                name,
                acronym,
                description,
            } => commands::exercise::add(config, &name, &acronym, description)?,
            ExerciseAction::List => commands::exercise::list(config)?,
            ExerciseAction::Update {
                id,
                name,
                acronym,
                description,
            } => {
                let changes = ExerciseChanges {
                    name,
                    acronym,
                    description: description.map(|d| Some(d).filter(|d| !d.is_empty())),
                };
                commands::exercise::update(config, id, changes)?
            }
            ExerciseAction::Delete { id } => commands::exercise::delete(config, id)?,
        },
        Commands::Session { action } => match action {
            SessionAction::Record { date, entries } => {
                let entries = entries
                    .iter()
                    .map(|e| e.parse::<EntryArg>())
                    .collect::<Result<Vec<_>, _>>()?;
                commands::session::record(config, date.as_deref(), &entries)?
            }
            SessionAction::List => commands::session::list(config)?,
            SessionAction::Show { id } => commands::session::show(config, id)?,
            SessionAction::Update { id, date } => commands::session::update(config, id, &date)?,
            SessionAction::Delete { id } => commands::session::delete(config, id)?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(config, &format)?,
            ConfigAction::Path => commands::config::path(config)?,
            ConfigAction::Init { force } => commands::config::init(force)?,
        },
    }

    Ok(())
}
