//! # Command-Line Interface Module
//!
//! Clap definitions for the `syncup` binary. Every subcommand maps onto one
//! catalog operation.
//!
//! ## Examples
//!
//! ```bash
//! syncup list
//! syncup add "Lover" "Taylor Swift" Pop --year 2019
//! syncup complete boh
//! syncup similar "Bohemian Rhapsody" --limit 3
//! syncup fuzzy "bohemian rapsody queen rock" --distance 2
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "syncup")]
#[command(about = "SyncUp: indexed music library with autocomplete, fuzzy search & similar-song suggestions")]
#[command(version)]
pub struct Args {
    /// Catalog CSV file to use instead of the one in the data directory
    #[arg(long, global = true, env = "SYNCUP_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every song in catalog order
    List,

    /// Add a song to the catalog
    ///
    /// Commas and line breaks are removed from the fields when the catalog
    /// file is written.
    Add {
        title: String,
        artist: String,
        genre: String,

        /// Release year
        #[arg(long)]
        year: Option<u32>,

        /// Duration in seconds
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Remove the first song with this title (case-insensitive)
    Remove {
        #[arg(value_hint = clap::ValueHint::Other)]
        title: String,
    },

    /// Show the first song with this title (case-insensitive)
    Find {
        #[arg(value_hint = clap::ValueHint::Other)]
        title: String,
    },

    /// Titles whose title, artist or genre starts with PREFIX
    Complete { prefix: String },

    /// Songs similar to the given one: same artist first, then same genre
    Similar {
        #[arg(value_hint = clap::ValueHint::Other)]
        title: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Titles whose "title artist genre" key is within DISTANCE edits of QUERY
    Fuzzy {
        query: String,

        /// Maximum Levenshtein distance
        #[arg(short, long, default_value = "2")]
        distance: i64,
    },

    /// Rebuild every index and rewrite the catalog file
    ///
    /// Malformed rows that were skipped on load disappear from the file.
    Reindex,

    /// Generate shell completions
    ///
    /// Usage: syncup completion bash > ~/.local/share/bash-completion/completions/syncup
    Completion { shell: Shell },

    /// Generate a bash completion script that also completes song titles
    CompletionEnhanced { shell: Shell },

    /// List song titles for completion scripts (hidden command)
    #[command(hide = true)]
    CompleteTitles {
        /// Only titles matching this prefix
        prefix: Option<String>,
    },
}
