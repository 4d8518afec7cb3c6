//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "caprino-checker")]
#[command(version)]
#[command(about = "Goat/sheep live-weight estimation from chest girth or AI photo analysis")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate weight from a photo file using AI analysis
    Analyze {
        /// Path to image file
        image: PathBuf,
    },

    /// Estimate weight from a chest-girth (CT) measurement in centimeters
    Girth {
        /// Girth value, e.g. 80.5 (decimal comma accepted)
        value: String,
    },

    /// Capture a photo from the camera and analyze it
    Capture {
        /// Save the captured frame to this path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Capture only; skip the AI analysis step
        #[arg(long)]
        no_analyze: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set model
        #[arg(long)]
        set_model: Option<String>,

        /// Store the API key in the config file
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set the preferred camera device (e.g. /dev/video1)
        #[arg(long)]
        set_camera_device: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
