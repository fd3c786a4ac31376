//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use geek_catalog::MediaKind;

#[derive(Parser)]
#[command(name = "geek")]
#[command(about = "Search and maintain a catalog of games, series, movies and visual novels", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database to use (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages, including SQL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search media by name, alternative title and category
    Search(SearchArgs),

    /// Show one media with its category, alternative titles and references
    Show {
        /// Media id
        id: i32,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Import categories and media from a YAML file or a directory of them
    Import {
        /// Seed file, or directory of .yaml files
        path: PathBuf,
    },

    /// Show catalog statistics
    Stats,

    /// Print the banner of a random media
    Artwork,

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone)]
pub(crate) struct SearchArgs {
    /// Name substring (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Alternative title substring (case-insensitive)
    #[arg(short, long)]
    pub alt: Option<String>,

    /// Category id
    #[arg(short, long, conflicts_with = "kind")]
    pub category: Option<i32>,

    /// Look up by kind (game, serie, movie, vn): matches --name against both
    /// name and alternative titles, or fetches --id directly
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<MediaKind>,

    /// Media id, only with --kind
    #[arg(long, requires = "kind")]
    pub id: Option<i32>,

    /// Extra fields to fill in (e.g. about,cover,banner)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Zero-based page number
    #[arg(short, long, default_value_t = 0)]
    pub page: u32,

    /// Page size (defaults to settings.toml, then 10)
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings and where the database lives
    Show,
    /// Print the settings file path
    Path,
    /// Save the default database path
    SetDb {
        /// Path to the catalog database
        path: PathBuf,
    },
    /// Save the default search page size
    SetPageSize {
        size: u32,
    },
}

fn parse_kind(s: &str) -> Result<MediaKind, String> {
    MediaKind::from_str_loose(s)
        .ok_or_else(|| format!("unknown kind '{s}' (expected game, serie, movie or vn)"))
}
