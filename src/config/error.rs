//! Errors raised while locating, reading or writing `config.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Settings file failure. The CLI prints these behind a `Config error:` prefix.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read settings file {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` and `column` are one-based, or 0 when toml gives no span.
    #[error("Invalid settings at {path}:{line}:{column}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Settings file not found: {path}")]
    NotFound { path: PathBuf },

    /// Returned by `bento config init` without `--force`.
    #[error("Settings file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("Cannot write settings file {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither `XDG_*_HOME` nor a home directory is available.
    #[error("Could not determine the home directory")]
    NoHomeDir,
}
