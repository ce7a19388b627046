//! CLI argument definitions and parsing.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for a text-to-speech web backend.
#[derive(Parser, Debug)]
#[command(name = "tts-console-rs")]
#[command(about = "Manage voices, synthesize speech and browse generation history")]
#[command(version)]
pub struct Args {
    /// Backend base URL (defaults to the saved value, then http://localhost:8080)
    #[arg(long, env = "TTS_CONSOLE_URL", global = true)]
    pub url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show or change the voice catalog
    Voices {
        #[command(subcommand)]
        action: Option<VoiceAction>,
    },

    /// Show or prune generated audio
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Synthesize speech from text
    Generate(GenerateArgs),

    /// Show or change server settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Ask the server to delete expired audio now
    Cleanup,

    /// Save the backend URL for later runs
    SetUrl {
        /// Base URL, e.g. http://localhost:8080
        url: String,
    },
}

/// Voice catalog actions.
#[derive(Subcommand, Debug, PartialEq)]
pub enum VoiceAction {
    /// List all voices, marking the selected one
    List,

    /// Add a custom voice
    Add {
        /// Voice key; spaces become underscores
        #[arg(short, long)]
        key: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Provider voice id
        #[arg(short = 'i', long)]
        voice_id: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Delete a custom voice
    Delete {
        /// Voice key
        key: String,
    },

    /// Select a voice and remember it for later runs
    Select {
        /// Voice key
        key: String,
    },
}

/// History actions.
#[derive(Subcommand, Debug, PartialEq)]
pub enum HistoryAction {
    /// List generated files, newest first
    List,

    /// Delete one generated file
    Delete {
        /// File name as shown by `history list`
        filename: String,
    },

    /// Delete every generated file
    Clear,

    /// Download a generated file
    Download {
        /// File name as shown by `history list`
        filename: String,

        /// Output path (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments for `generate`.
#[derive(ClapArgs, Debug, PartialEq)]
pub struct GenerateArgs {
    /// Text to synthesize
    pub text: String,

    /// Voice key (defaults to the selected voice)
    #[arg(long)]
    pub voice: Option<String>,

    /// Save the generated audio to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Server settings actions.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SettingsAction {
    /// Show server settings
    Show,

    /// Change server settings
    Set {
        /// Provider API token
        #[arg(long)]
        api_token: Option<String>,

        /// Minutes before generated audio is deleted
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        cleanup_interval: Option<u32>,
    },
}
