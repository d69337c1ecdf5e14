use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "instagrab")]
#[command(author, version, about = "Resolve Instagram posts, reels and stories into download links", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ./instagrab.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one URL and print its preview and download options
    Fetch {
        /// Instagram post, reel, story or IGTV URL
        url: String,

        /// Print the render tree as JSON
        #[arg(long)]
        json: bool,

        /// Download every option into this directory
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },

    /// Validate a URL without contacting the extraction API
    Check {
        /// URL to validate
        url: String,
    },

    /// Read URLs from stdin, one per line ("retry" resets, "quit" exits)
    Interactive,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
