use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accentscan")]
#[command(author, version, about = "English accent classification from video URLs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Video URL to analyze (shorthand for `analyze <URL>`)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the accent in a single video (.mp4 URL)
    Analyze {
        /// HTTP(S) URL of an .mp4 video
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the web form
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Check FFmpeg and API key setup
    Doctor,

    /// Show configuration
    Config,
}
