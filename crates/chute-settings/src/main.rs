//! RealChute settings tool entry point.
//!
//! Inspects and edits `RealChute_Settings.cfg` outside the game.  Opening the
//! store runs the same load protocol as the mod itself, so a missing file is
//! created and an incomplete one is repaired before any command runs.
//!
//! # Usage
//!
//! ```text
//! realchute-settings [--path <FILE>] <COMMAND>
//!
//! Commands:
//!   show                 Print settings and preset names as JSON
//!   set <KEY> <VALUE>    Change one flag and save (e.g. `set autoArm true`)
//!   presets              List stored preset names
//!   save                 Rewrite the settings file
//! ```
//!
//! Without `--path` (or `REALCHUTE_SETTINGS_PATH`) the file is looked up in
//! `GameData/RealChute/Plugins/PluginData/` next to the executable.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chute_core::{ConfigValue, PresetsLibrary, Settings, SettingsKey};
use chute_settings::application::load_settings::LoadAction;
use chute_settings::infrastructure::storage::{
    paths::{settings_url, SETTINGS_PATH_ENV},
    settings_file::FileSettingsRepository,
};
use chute_settings::{fetch, SettingsRepository, SettingsStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit the RealChute settings file.
#[derive(Debug, Parser)]
#[command(name = "realchute-settings", version)]
struct Cli {
    /// Settings file to operate on.
    #[arg(long, env = SETTINGS_PATH_ENV)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print settings and preset names as JSON.
    Show,
    /// Change one flag and save the file.
    Set {
        /// `autoArm`, `jokeActivated`, `useStaging` or `hideIcon`.
        key: SettingsKey,
        /// `true` or `false`.
        #[arg(action = ArgAction::Set, value_parser = parse_flag)]
        value: bool,
    },
    /// List stored preset names.
    Presets,
    /// Rewrite the settings file.
    Save,
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    bool::from_config_str(raw).map_err(|e| e.to_string())
}

/// JSON shape printed by `show`.
#[derive(Debug, Serialize)]
struct SettingsReport<'a> {
    path: String,
    load_action: LoadAction,
    settings: &'a Settings,
    presets: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // An explicit path gets its own store; otherwise use the process-wide one.
    let explicit_store;
    let (store, path): (&SettingsStore, PathBuf) = match cli.path {
        Some(path) => {
            explicit_store = SettingsStore::open(FileSettingsRepository::new(&path))
                .with_context(|| format!("opening settings at {}", path.display()))?;
            (&explicit_store, path)
        }
        None => {
            let path = settings_url()
                .context("resolving settings file path")?
                .to_path_buf();
            let store = fetch().with_context(|| format!("opening settings at {}", path.display()))?;
            (store, path)
        }
    };
    let repository = FileSettingsRepository::new(&path);

    // The store is open, so the file exists and parses.
    let library = repository
        .load()
        .context("reading presets")?
        .map(|root| PresetsLibrary::from_settings_tree(&root))
        .unwrap_or_default();

    match cli.command {
        Command::Show => {
            let settings = store.snapshot();
            let report = SettingsReport {
                path: path.display().to_string(),
                load_action: store.load_action(),
                settings: &settings,
                presets: library.iter().map(|p| p.name.clone()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Set { key, value } => {
            store.update(|s| s.set(key, value));
            store.save(&library).context("saving settings")?;
            info!("{key} set to {value}");
        }
        Command::Presets => {
            for preset in library.iter() {
                println!("{}", preset.name);
            }
        }
        Command::Save => {
            store.save(&library).context("saving settings")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("realchute-settings").chain(args.iter().copied()))
    }

    #[test]
    fn test_set_accepts_file_key_spelling() {
        let cli = parse(&["set", "autoArm", "true"]).expect("parse");

        assert!(matches!(
            cli.command,
            Command::Set { key: SettingsKey::AutoArm, value: true }
        ));
    }

    #[test]
    fn test_set_accepts_snake_case_key_and_upper_case_flag() {
        let cli = parse(&["set", "hide_icon", "FALSE"]).expect("parse");

        assert!(matches!(
            cli.command,
            Command::Set { key: SettingsKey::HideIcon, value: false }
        ));
    }

    #[test]
    fn test_set_rejects_position_key() {
        // position is kept in memory only and cannot be set from the file tool
        let result = parse(&["set", "position", "true"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_set_rejects_non_bool_value() {
        assert!(parse(&["set", "useStaging", "yes"]).is_err());
        assert_eq!(parse_flag("True"), Ok(true));
        assert!(parse_flag("1").is_err());
    }

    #[test]
    fn test_path_flag_overrides_default_location() {
        let cli = parse(&["--path", "/tmp/RealChute_Settings.cfg", "show"]).expect("parse");

        assert_eq!(cli.path, Some(PathBuf::from("/tmp/RealChute_Settings.cfg")));
        assert!(matches!(cli.command, Command::Show));
    }
}
