//! CLI interface for Synesthesia

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn text, colors and numbers into sound parameters
#[derive(Parser)]
#[command(name = "synesthesia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path (defaults are used if it does not exist)
        #[arg(short, long, default_value = "synesthesia.yaml")]
        config: PathBuf,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Detect whether input is a color, number or text
    Detect {
        content: String,
    },

    /// Map text to a note sequence
    Text {
        text: String,

        /// Scale: pentatonic, major or minor (unknown names use pentatonic)
        #[arg(short, long, default_value = "pentatonic")]
        scale: String,
    },

    /// Map a hex color to sound parameters
    Color {
        hex: String,
    },

    /// Map a number to pattern parameters
    Number {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Detect the input type and map it
    Auto {
        #[arg(allow_hyphen_values = true)]
        content: String,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "synesthesia.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
