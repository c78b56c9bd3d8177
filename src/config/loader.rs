//! Reads `config.toml` into [`Config`].
//!
//! A missing file at the default location is not an error: bento runs on
//! defaults until `bento config init` writes one.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and parses the settings file at `path`.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::parse_toml(&content, path)
    }

    /// Loads `$XDG_CONFIG_HOME/bento/config.toml`, or defaults when absent.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path()?;
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load_from_path(&path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| line_column(content, span.start))
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// One-based line and column of byte `offset` in `content`.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    (before.matches('\n').count() + 1, offset - line_start + 1)
}
