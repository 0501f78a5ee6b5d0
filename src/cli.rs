use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tagscan")]
#[command(author, version, about = "Music tag scanner built on ffmpeg probe reports")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run ffmpeg on files and print their parsed tags
    Probe {
        /// Files to probe
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a captured ffmpeg report
    Parse {
        /// Report file, or `-` for stdin
        #[arg(default_value = "-")]
        report: String,
    },

    /// Probe files and print the media file records as JSON
    Scan {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Use a throwaway in-memory genre store instead of the database
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the sort key for a display string
    SortKey {
        /// Text to sanitize
        text: String,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
