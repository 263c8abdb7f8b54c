//! Configuration for the board.
//!
//! Settings are layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (via clap `env`)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! A missing default config file is fine. An explicit `--config` path that
//! doesn't exist is an error.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    board: BoardFileConfig,
    ui: UiFileConfig,
    logging: LoggingFileConfig,
}

/// `[board]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    seed_file: Option<PathBuf>,
}

/// `[ui]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    mouse: Option<bool>,
}

/// `[logging]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LoggingFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// JSON file with starter tasks; the built-in list is used when unset.
    pub seed_file: Option<PathBuf>,
    /// Capture mouse clicks on cards and the dialog backdrop.
    pub mouse: bool,
    pub log_level: String,
    /// Defaults to `$TMPDIR/taskboard.log`.
    pub log_file: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            mouse: true,
            log_level: "info".to_string(),
            log_file: std::env::temp_dir().join("taskboard.log"),
        }
    }
}

impl BoardConfig {
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            seed_file: cli
                .seed
                .clone()
                .or_else(|| file.board.seed_file.clone()),
            mouse: !cli.no_mouse && file.ui.mouse.unwrap_or(defaults.mouse),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.logging.level.clone())
                .unwrap_or(defaults.log_level),
            log_file: cli
                .log_file
                .clone()
                .or_else(|| file.logging.file.clone())
                .unwrap_or(defaults.log_file),
        }
    }
}

#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Three-column task board for the terminal")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file with the tasks to show.
    #[arg(long, env = "TASKBOARD_SEED")]
    pub seed: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "TASKBOARD_LOG")]
    pub log_level: Option<String>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Don't capture the mouse.
    #[arg(long)]
    pub no_mouse: bool,
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("taskboard").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
