//! Editor settings inspector: command-line entry point.
//!
//! A small command-line front end to the settings service.  It runs the same
//! startup lifecycle the editor runs (locate, load or fall back to defaults,
//! recompute the debug host), performs one command, and saves on the way out
//! when the command changed something.
//!
//! # Usage
//!
//! ```text
//! editor-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   path                 Print the settings and per-project directories
//!   list [--json]        List visible settings in presentation order
//!   get <KEY>            Print one value
//!   set <KEY> <VALUE>    Set a value (TOML literal, #RRGGBB color, or text)
//!   unset <KEY>          Remove a value
//!   raise <KEY>          Move a setting to the end of the presentation order
//!   favorites [add DIR]  Show or extend the favorite directories
//!   recent [add DIR]     Show or extend the recent directories
//!   reset                Restore every setting to its default
//!
//! Options:
//!   --config-root <DIR>  Settings root override [env: EDITOR_SETTINGS_ROOT]
//!   --project <PATH>     Project resource path [default: current directory]
//!   --screens <N>        Number of attached monitors [default: 1]
//! ```
//!
//! Log output goes to stderr so `list --json` can be piped.  Set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) for more detail.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use editor_settings::infrastructure::platform::SystemHost;
use editor_settings::{EditorSettings, LocationOptions};
use editor_settings_core::Value;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit persisted editor settings.
#[derive(Debug, Parser)]
#[command(name = "editor-settings", version)]
struct Cli {
    /// Use this directory as the settings root instead of the per-user one.
    #[arg(long, env = "EDITOR_SETTINGS_ROOT")]
    config_root: Option<PathBuf>,

    /// Resource path of the project whose per-project directory to use.
    #[arg(long)]
    project: Option<String>,

    /// Number of attached monitors, for the game window screen choices.
    #[arg(long, default_value_t = 1)]
    screens: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the settings and per-project directories.
    Path,
    /// List visible settings in presentation order.
    List {
        /// Emit JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },
    /// Print the value of one setting.
    Get { key: String },
    /// Set a setting.
    Set { key: String, value: String },
    /// Remove a setting.
    Unset { key: String },
    /// Move a setting to the end of the presentation order.
    Raise { key: String },
    /// Show or extend the favorite directories.
    Favorites {
        #[command(subcommand)]
        action: Option<DirAction>,
    },
    /// Show or extend the recently visited directories.
    Recent {
        #[command(subcommand)]
        action: Option<DirAction>,
    },
    /// Restore every setting to its default.
    Reset,
}

#[derive(Debug, Subcommand)]
enum DirAction {
    /// Append a directory to the end of the list.
    Add { dir: String },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // `RUST_LOG` controls verbosity; fall back to `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let project = match cli.project {
        Some(project) => project,
        None => std::env::current_dir()
            .context("cannot determine the current directory for --project")?
            .to_string_lossy()
            .into_owned(),
    };
    let host = SystemHost::new(project).with_screen_count(cli.screens);
    let options = LocationOptions {
        root_override: cli.config_root,
    };

    let settings = EditorSettings::create(&host, &options);

    let modified = run(&settings, &host, cli.command)?;

    if modified {
        settings
            .destroy()
            .context("failed to write the settings file")?;
        info!("changes saved");
    }
    Ok(())
}

/// Executes `command`; returns whether the store was modified.
fn run(settings: &EditorSettings, host: &SystemHost, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Path => {
            match settings.settings_path() {
                Some(path) => println!("settings: {}", path.display()),
                None => println!("settings: <unresolved>"),
            }
            if let Some(path) = settings.project_settings_path() {
                println!("project:  {}", path.display());
            }
            Ok(false)
        }
        Command::List { json } => {
            let list = settings.property_list();
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for info in list {
                    let value = settings.get(&info.name).unwrap_or(Value::Nil);
                    println!("{:<50} {}", info.name, value);
                }
            }
            Ok(false)
        }
        Command::Get { key } => {
            let value = settings
                .get(&key)
                .with_context(|| format!("setting not found: {key}"))?;
            println!("{value}");
            Ok(false)
        }
        Command::Set { key, value } => {
            settings.set(&key, Value::parse_literal(&value));
            Ok(true)
        }
        Command::Unset { key } => {
            settings.set(&key, Value::Nil);
            Ok(true)
        }
        Command::Raise { key } => {
            settings.raise_order(&key)?;
            Ok(true)
        }
        Command::Favorites { action } => {
            Ok(dir_command(action, settings.favorite_dirs(), |dirs| {
                settings.set_favorite_dirs(dirs)
            }))
        }
        Command::Recent { action } => Ok(dir_command(action, settings.recent_dirs(), |dirs| {
            settings.set_recent_dirs(dirs)
        })),
        Command::Reset => {
            settings.reset_to_defaults(host);
            Ok(true)
        }
    }
}

/// Prints `current`, or applies `action` to it through `store`.
///
/// Directory lists are written immediately by the service, so this never
/// asks for a settings file save.
fn dir_command(
    action: Option<DirAction>,
    mut current: Vec<String>,
    store: impl FnOnce(Vec<String>),
) -> bool {
    match action {
        None => {
            for dir in current {
                println!("{dir}");
            }
        }
        Some(DirAction::Add { dir }) => {
            current.push(dir);
            store(current);
        }
    }
    false
}
