use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gear5tv")]
#[command(author, version, about = "Anime catalog with watch-progress tracking")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the directory where watch progress is stored
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog titles, optionally filtered and sorted
    List {
        /// Genre to include ("all" for any)
        #[arg(long)]
        genre: Option<String>,

        /// Release season: winter, spring, summer, fall
        #[arg(long)]
        season: Option<String>,

        /// Animation studio
        #[arg(long)]
        studio: Option<String>,

        /// Airing status: ongoing or completed
        #[arg(long)]
        status: Option<String>,

        /// Title type: movie or series (tv)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Sort order: default, rating, latest, title
        #[arg(long, default_value = "default")]
        order: String,

        /// Only long-running series
        #[arg(long)]
        long: bool,
    },

    /// Show the home page rows: spotlight, popular and latest trailers
    Home {
        /// Titles per row
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Search titles and genres
    Search {
        /// Text to look for
        query: String,
    },

    /// Show a title with its seasons and episodes
    Show {
        /// Title id
        id: String,
    },

    /// Resolve what would play for a title and optionally record a position
    Play {
        /// Title id
        id: String,

        /// Season number
        #[arg(long)]
        season: Option<u32>,

        /// Episode number
        #[arg(long)]
        episode: Option<u32>,

        /// Play the trailer instead
        #[arg(long)]
        trailer: bool,

        /// Playback position in seconds to record
        #[arg(long, requires = "duration")]
        position: Option<f64>,

        /// Media duration in seconds
        #[arg(long, requires = "position")]
        duration: Option<f64>,
    },

    /// Show saved progress for a title
    Progress {
        /// Title id
        id: String,
    },

    /// Forget saved progress for a title
    Forget {
        /// Title id
        id: String,
    },

    /// Show the continue-watching row
    Continue {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with every setting filled in
    Init {
        /// Where to write (an existing file keeps its comments)
        #[arg(default_value = "gear5tv.toml")]
        path: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
