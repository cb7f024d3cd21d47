use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "iconset",
    about = "Procedurally generate an app icon set and update its Contents.json"
)]
pub struct Cli {
    /// Defaults to `generate`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (optional; defaults apply when absent)
    #[arg(long, global = true, default_value = "iconset.toml")]
    pub config: PathBuf,

    /// Icon set directory holding Contents.json (overrides the config)
    #[arg(
        long,
        global = true,
        long_help = "\
Icon set directory holding Contents.json.
Overrides `asset_dir` from the config file.

Generated files are written next to Contents.json:
  Icon-{points}@{scale}x.png     regular entries
  Icon-AppStore-{pixels}.png     marketing entries (ios-marketing, watch-marketing)"
    )]
    pub asset_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every icon listed in Contents.json and fill in filenames
    Generate,

    /// Report icons that are missing or differ from a fresh render
    Check,

    /// Create a new iconset.toml config file
    Init {
        /// Also create the icon set directory with a starter iPhone Contents.json
        #[arg(long)]
        manifest: bool,
    },
}
