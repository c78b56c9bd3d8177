/// Default settings template and file creation.
pub mod default;

/// Settings error types.
pub mod error;

/// Settings file loader.
pub mod loader;

/// TOML settings schema types.
pub mod schema;

/// XDG Base Directory path resolution utilities.
pub mod xdg;
