//! CLI argument definitions for the Hanguk binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.
//! `RUST_LOG`, when set, sits between `--log-level` and `HANGUK_LOG_LEVEL`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hanguk: a voice skill that tells facts about Korea.
#[derive(Parser, Debug)]
#[command(name = "hanguk", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve one JSON request envelope and print the response envelope.
    Invoke {
        /// File holding the request envelope; `-` or absent reads stdin.
        #[arg(short = 'r', long = "request")]
        request: Option<PathBuf>,
    },
    /// Hold an interactive session on stdin.
    ///
    /// Each line is `launch`, `end`, `fact`, `help`, `stop`, `cancel`,
    /// `fallback`, or a raw intent name.
    Converse {
        /// Locale for every request in the session.
        #[arg(long = "locale")]
        locale: Option<String>,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > HANGUK_CONFIG env var > ~/.hanguk/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("HANGUK_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > HANGUK_LOG_LEVEL env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(level) = std::env::var("HANGUK_LOG_LEVEL") {
            if !level.trim().is_empty() {
                return level;
            }
        }
        config_level.to_string()
    }
}

impl Command {
    /// Request file for `invoke`, `None` meaning stdin.
    pub fn request_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Invoke { request: Some(p) } if p.as_os_str() != "-" => Some(p),
            _ => None,
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".hanguk").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".hanguk").join("config.toml");
    }
    PathBuf::from("config.toml")
}
