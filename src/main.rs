//! Bento - CLI entry point
//!
//! Edits a bento page snapshot from the command line. Every mutating command
//! opens the snapshot, applies one store operation and saves it back.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use bento::config::error::ConfigError;
use bento::config::loader::ConfigLoader;
use bento::config::schema::{Config, LogLevel};
use bento::config::{default, xdg};
use bento::store::{BentoStore, StoreError};
use bento::{
    logging, BlockContent, BlockType, BlockUpdate, GridUpdate, MetadataUpdate, Position,
    ProfileUpdate, Size, ThemeUpdate,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

/// Bento grid page editor
#[derive(Parser)]
#[command(name = "bento")]
#[command(version, about = "Bento grid page editor")]
struct Cli {
    /// Snapshot file to edit (overrides `[storage] snapshot_path`)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the bento CLI
#[derive(Subcommand)]
enum Commands {
    /// List blocks with their position and size
    List,

    /// Add a block; without --x/--y it goes to the first free slot
    Add {
        /// Block type (link, text, image, title, map)
        kind: BlockType,
        /// Column of the top-left cell
        #[arg(long, requires = "y")]
        x: Option<u32>,
        /// Row of the top-left cell
        #[arg(long, requires = "x")]
        y: Option<u32>,
        /// Width in cells (defaults per type)
        #[arg(long)]
        width: Option<u32>,
        /// Height in cells (defaults per type)
        #[arg(long)]
        height: Option<u32>,
        #[command(flatten)]
        content: ContentArgs,
    },

    /// Update a block's type, size or content
    Update {
        /// Block id
        id: String,
        /// New block type
        #[arg(long = "type")]
        kind: Option<BlockType>,
        /// New width in cells
        #[arg(long)]
        width: Option<u32>,
        /// New height in cells
        #[arg(long)]
        height: Option<u32>,
        #[command(flatten)]
        content: ContentArgs,
    },

    /// Move a block to an explicit cell
    Move {
        /// Block id
        id: String,
        /// Target column
        #[arg(long)]
        x: u32,
        /// Target row
        #[arg(long)]
        y: u32,
    },

    /// Delete a block and pack the rest upward
    Delete {
        /// Block id
        id: String,
    },

    /// Copy a block below the original
    Duplicate {
        /// Block id
        id: String,
    },

    /// Pack all blocks upward to close vertical gaps
    Compact,

    /// Edit or reset the page theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Edit or reset grid settings
    Grid {
        #[command(subcommand)]
        action: GridAction,
    },

    /// Edit or reset the profile card
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Edit document metadata
    Meta {
        #[command(subcommand)]
        action: MetaAction,
    },

    /// Export the page as JSON (stdout by default)
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Copy to the system clipboard instead of stdout
        #[arg(long, conflicts_with = "output")]
        clipboard: bool,
    },

    /// Replace the page with JSON from a file, stdin or the clipboard
    Import {
        /// File to read; `-` or nothing reads stdin
        file: Option<PathBuf>,
        /// Read from the system clipboard
        #[arg(long, conflicts_with = "file")]
        clipboard: bool,
    },

    /// Replace the page with the default page
    Reset,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Content flags shared by `add` and `update`.
#[derive(Args, Debug, Default)]
struct ContentArgs {
    /// Title (link, title)
    #[arg(long)]
    title: Option<String>,
    /// Description (link)
    #[arg(long)]
    description: Option<String>,
    /// Target URL (link)
    #[arg(long)]
    url: Option<String>,
    /// Body text (text)
    #[arg(long)]
    text: Option<String>,
    /// Image source URL (image)
    #[arg(long)]
    src: Option<String>,
    /// Image alt text (image)
    #[arg(long)]
    alt: Option<String>,
    /// Latitude (map)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude (map)
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
    /// Zoom level (map)
    #[arg(long)]
    zoom: Option<u32>,
}

impl ContentArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.text.is_none()
            && self.src.is_none()
            && self.alt.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.zoom.is_none()
    }
}

impl From<ContentArgs> for BlockContent {
    fn from(args: ContentArgs) -> Self {
        BlockContent {
            title: args.title,
            description: args.description,
            url: args.url,
            text: args.text,
            src: args.src,
            alt: args.alt,
            lat: args.lat,
            lng: args.lng,
            zoom: args.zoom,
            ..Default::default()
        }
    }
}

/// Actions for the `theme` subcommand.
#[derive(Subcommand)]
enum ThemeAction {
    /// Change theme values
    Set {
        #[arg(long)]
        background_color: Option<String>,
        #[arg(long)]
        primary_color: Option<String>,
        #[arg(long)]
        secondary_color: Option<String>,
        #[arg(long)]
        text_color: Option<String>,
        #[arg(long)]
        font_family: Option<String>,
        #[arg(long)]
        border_radius: Option<String>,
    },
    /// Restore the default theme
    Reset,
}

/// Actions for the `grid` subcommand.
#[derive(Subcommand)]
enum GridAction {
    /// Change grid settings
    Set {
        /// Column count (at least 1)
        #[arg(long)]
        columns: Option<u32>,
        /// Gap between cells in pixels
        #[arg(long)]
        gap: Option<u32>,
        /// CSS max width, e.g. 900px
        #[arg(long)]
        max_width: Option<String>,
        /// Row height in pixels
        #[arg(long)]
        row_height: Option<u32>,
    },
    /// Restore default grid settings
    Reset,
}

/// Actions for the `profile` subcommand.
#[derive(Subcommand)]
enum ProfileAction {
    /// Change profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Restore the default profile
    Reset,
}

/// Actions for the `meta` subcommand.
#[derive(Subcommand)]
enum MetaAction {
    /// Change metadata fields
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

/// Failures surfaced by page commands.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

fn main() -> ExitCode {
    let Cli { snapshot, command } = Cli::parse();

    if let Commands::Config { action } = command {
        logging::init(LogLevel::default());
        return run_config_command(action);
    }

    let settings = match ConfigLoader::load_default() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(settings.logging.level);

    match run_page_command(snapshot, command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Handles `bento config ...`, which works without a valid settings file.
fn run_config_command(action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => xdg::config_path().map(|path| {
            println!("{}", path.display());
        }),
        ConfigAction::Validate => ConfigLoader::load_default().map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Opens the snapshot, applies `command` and saves when it changed the page.
fn run_page_command(
    snapshot: Option<PathBuf>,
    command: Commands,
    settings: &Config,
) -> Result<(), CliError> {
    let path = match snapshot {
        Some(path) => path,
        None => xdg::snapshot_path(&settings.storage)?,
    };
    let mut store = BentoStore::open(path, settings.layout.clone())?;

    let changed = match command {
        Commands::List => {
            print_blocks(&store);
            false
        }
        Commands::Add {
            kind,
            x,
            y,
            width,
            height,
            content,
        } => {
            let position = x.zip(y).map(|(x, y)| Position::new(x, y));
            let size = size_override(kind.default_size(), width, height);
            let block = store.add_block_with_content(kind, content.into(), position, size)?;
            println!(
                "Added {} block {} at ({}, {})",
                block.kind, block.id, block.position.x, block.position.y
            );
            true
        }
        Commands::Update {
            id,
            kind,
            width,
            height,
            content,
        } => {
            let current = store
                .block(&id)
                .map(|b| b.size)
                .ok_or_else(|| StoreError::BlockNotFound(id.clone()))?;
            let update = BlockUpdate {
                kind,
                size: size_override(current, width, height),
                content: (!content.is_empty()).then(|| content.into()),
                ..Default::default()
            };
            store.update_block(&id, update)?;
            println!("Updated block {id}");
            true
        }
        Commands::Move { id, x, y } => {
            store.update_block_position(&id, Position::new(x, y))?;
            println!("Moved block {id} to ({x}, {y})");
            true
        }
        Commands::Delete { id } => {
            store.delete_block(&id)?;
            println!("Deleted block {id}");
            true
        }
        Commands::Duplicate { id } => {
            let copy = store.duplicate_block(&id)?;
            println!(
                "Duplicated block {} as {} at ({}, {})",
                id, copy.id, copy.position.x, copy.position.y
            );
            true
        }
        Commands::Compact => {
            let report = store.compact()?;
            if report.changed() {
                println!("Moved {} blocks", report.moves.len());
            } else {
                println!("Layout is already compact");
            }
            report.changed()
        }
        Commands::Theme { action } => {
            match action {
                ThemeAction::Set {
                    background_color,
                    primary_color,
                    secondary_color,
                    text_color,
                    font_family,
                    border_radius,
                } => store.update_theme(ThemeUpdate {
                    background_color,
                    primary_color,
                    secondary_color,
                    text_color,
                    font_family,
                    border_radius,
                }),
                ThemeAction::Reset => store.reset_theme(),
            }
            true
        }
        Commands::Grid { action } => {
            match action {
                GridAction::Set {
                    columns,
                    gap,
                    max_width,
                    row_height,
                } => store.update_grid(GridUpdate {
                    columns,
                    gap,
                    max_width,
                    row_height,
                })?,
                GridAction::Reset => store.reset_grid(),
            }
            true
        }
        Commands::Profile { action } => {
            match action {
                ProfileAction::Set { name, bio, avatar } => {
                    store.update_profile(ProfileUpdate { name, bio, avatar })
                }
                ProfileAction::Reset => store.reset_profile(),
            }
            true
        }
        Commands::Meta {
            action:
                MetaAction::Set {
                    title,
                    description,
                    author,
                },
        } => {
            store.update_metadata(MetadataUpdate {
                title,
                description,
                author,
            });
            true
        }
        Commands::Export { output, clipboard } => {
            let json = store.export_config()?;
            if clipboard {
                arboard::Clipboard::new()?.set_text(json)?;
                println!("Copied configuration to clipboard");
            } else if let Some(path) = output {
                fs::write(&path, json).map_err(|e| CliError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                println!("Exported configuration to {}", path.display());
            } else {
                println!("{json}");
            }
            false
        }
        Commands::Import { file, clipboard } => {
            let json = if clipboard {
                arboard::Clipboard::new()?.get_text()?
            } else {
                read_input(file)?
            };
            store.import_config(&json)?;
            println!("Imported {} blocks", store.blocks().len());
            true
        }
        Commands::Reset => {
            store.reset_config();
            println!("Reset page to defaults");
            true
        }
        Commands::Config { .. } => false,
    };

    if changed {
        store.save()?;
    }
    Ok(())
}

/// Builds a size from optional overrides; `None` when neither is given.
fn size_override(base: Size, width: Option<u32>, height: Option<u32>) -> Option<Size> {
    if width.is_none() && height.is_none() {
        return None;
    }
    Some(Size::new(
        width.unwrap_or(base.width),
        height.unwrap_or(base.height),
    ))
}

/// Reads import input from a file, or stdin for `-` / no file.
fn read_input(file: Option<PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(&path).map_err(|e| CliError::Io { path, source: e })
        }
        _ => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|e| CliError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(json)
        }
    }
}

fn print_blocks(store: &BentoStore) {
    if store.blocks().is_empty() {
        println!("No blocks");
        return;
    }
    for block in store.blocks() {
        println!(
            "{:<28} {:<6} ({}, {}) {}x{}",
            block.id,
            block.kind.to_string(),
            block.position.x,
            block.position.y,
            block.size.width,
            block.size.height
        );
    }
}
