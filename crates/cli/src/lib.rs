//! # Shelfmap CLI
//!
//! Command-line interface for Shelfmap.
//!
//! Every editing command loads the layout file, applies one edit and writes
//! it back, so the same operations the desktop editor offers can be scripted.
//!
//! ## Commands
//!
//! - `init` - Build a layout file from the product store
//! - `aisles` / `legend` - Inspect the layout
//! - `create-aisle`, `move-aisle`, `delete-aisle`, `door`, `resize` - Edit aisles and the grid
//! - `assign`, `unassign` - Place products into aisles
//! - `search`, `directions` - Find a product and walk to it
//! - `render` - Export the editor view or the store map as PNG or SVG
//! - `save`, `load` - Sync the layout with the product store
//! - `import-csv`, `export-csv` - Exchange the product table as CSV
//!

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use shelfmap_ir::Settings;
use std::path::{Path, PathBuf};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

/// Store aisle layout editor and map renderer
#[derive(Debug, Parser)]
#[command(name = "shelfmap", version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./shelfmap.toml when present)
    #[arg(long, global = true, value_name = "FILE", env = "SHELFMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Layout file (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// JSON product store (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a layout file from the products in the store
    Init {
        /// Number of grid rows
        #[arg(long)]
        rows: Option<u32>,
        /// Number of grid columns
        #[arg(long)]
        columns: Option<u32>,
        /// Overwrite an existing layout file
        #[arg(long)]
        force: bool,
    },

    /// List the aisles of the layout
    Aisles {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the category colors
    Legend,

    /// Add an aisle above the door
    CreateAisle {
        /// Aisle name
        #[arg(long)]
        name: String,
        /// Width in cells
        #[arg(long, default_value_t = 1)]
        width: u32,
        /// Height in cells
        #[arg(long, default_value_t = 1)]
        height: u32,
        /// Category (grocery, electronics, clothing, home, office, toys)
        #[arg(long, default_value = "grocery")]
        category: String,
    },

    /// Move an aisle and its products to a new top-left cell
    MoveAisle {
        /// Aisle name or id
        aisle: String,
        /// Target column
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        /// Target row
        #[arg(long, allow_hyphen_values = true)]
        y: i64,
    },

    /// Delete an aisle and unassign its products
    DeleteAisle {
        /// Aisle name or id
        aisle: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Put a product into an aisle at a random cell
    Assign {
        /// Product name or id
        product: String,
        /// Aisle name or id
        #[arg(long)]
        aisle: String,
    },

    /// Remove a product from its aisle
    Unassign {
        /// Product name or id
        product: String,
    },

    /// Move the door to a column
    Door {
        /// Door column (clamped to the grid)
        #[arg(allow_hyphen_values = true)]
        column: i64,
    },

    /// Change the grid size
    Resize {
        #[arg(long)]
        rows: u32,
        #[arg(long)]
        columns: u32,
    },

    /// Find products by name, optionally narrowed to category tags
    Search {
        /// Text to look for; may be left out when filtering by tag
        query: Option<String>,
        /// Keep only products with this tag (repeat to match any of several)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Maximum number of name matches
        #[arg(long, default_value_t = shelfmap_ir::SEARCH_RESULT_LIMIT)]
        limit: usize,
    },

    /// Walking directions from the door to a product
    Directions {
        /// Product name or id
        product: String,
    },

    /// Export a picture of the layout (.png or .svg)
    Render {
        /// Output file; the extension picks the format
        #[arg(short, long)]
        output: PathBuf,
        /// Draw the read-only store map instead of the editor view
        #[arg(long)]
        map: bool,
        /// Highlight the route to this product
        #[arg(long)]
        selected: Option<String>,
    },

    /// Write product positions from the layout to the store
    Save,

    /// Rebuild the layout file from the store
    Load,

    /// Replace the store's products with the rows of a CSV file
    ImportCsv {
        /// CSV file to read
        file: PathBuf,
    },

    /// Write the store's products as CSV
    ExportCsv {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ============================================================================
// Context
// ============================================================================

/// Resolved settings and file locations for one invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    pub layout_path: PathBuf,
    pub store_path: PathBuf,
}

impl Context {
    pub fn new(settings: Settings, layout: Option<&Path>, store: Option<&Path>) -> Self {
        let layout_path = layout
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.storage.layout_path.clone());
        let store_path = store
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.storage.products_path.clone());
        Self {
            settings,
            layout_path,
            store_path,
        }
    }

    /// Load settings and resolve paths from the parsed arguments
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let settings = Settings::load_or_default(cli.config.as_deref())?;
        Ok(Self::new(
            settings,
            cli.layout.as_deref(),
            cli.store.as_deref(),
        ))
    }
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    commands::dispatch(&ctx, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move_aisle_negative() {
        let cli = Cli::parse_from(["shelfmap", "move-aisle", "Snacks", "--x", "-3", "--y", "2"]);
        match cli.command {
            Command::MoveAisle { aisle, x, y } => {
                assert_eq!(aisle, "Snacks");
                assert_eq!((x, y), (-3, 2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_context_prefers_flags() {
        let ctx = Context::new(
            Settings::default(),
            Some(Path::new("custom.shelfmap")),
            None,
        );
        assert_eq!(ctx.layout_path, PathBuf::from("custom.shelfmap"));
        assert_eq!(ctx.store_path, PathBuf::from("products.json"));
    }
}
