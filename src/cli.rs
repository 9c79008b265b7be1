//! Command-line interface for vocoach
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voice-driven mock interview trainer
#[derive(Parser, Debug)]
#[command(name = "vocoach", version, about = "Voice-driven mock interview trainer")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check connectivity to the configured providers
    Check,

    /// Stream a WAV recording through the transcription pipeline
    Transcribe {
        /// WAV file to transcribe
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print intermediate transcript updates as segments merge
        #[arg(short, long)]
        verbose: bool,
    },
}
