//! Indexed music library with prefix autocomplete, fuzzy lookup and
//! similar-song suggestions, mirrored to a CSV file.
//!
//! Core modules:
//! - [`catalog`] - Song list owner; keeps the indexes and the CSV in step
//! - [`trie`] - Prefix index behind autocomplete
//! - [`bktree`] - Levenshtein BK-tree behind fuzzy lookup
//! - [`taxonomy`] - Genre → artist grouping behind "similar songs"
//! - [`storage`] - CSV reading and writing
//!
//! ### Supporting Modules
//!
//! - [`song`] - The song model
//! - [`config`] - Data directory and catalog location
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use syncup::catalog::Catalog;
//! use syncup::song::Song;
//!
//! // Loads the file, creating it with five seed songs if it is missing.
//! let mut catalog = Catalog::open("data/canciones.csv");
//!
//! catalog.add(Song::new("We Will Rock You", "Queen", "Rock"));
//!
//! // Titles, artists and genres all lead back to titles.
//! let titles = catalog.autocomplete("que");
//! assert!(titles.contains(&"We Will Rock You".to_string()));
//!
//! if let Some(seed) = catalog.find_by_title("bohemian rhapsody").cloned() {
//!     for song in catalog.recommend_similar(&seed, 5) {
//!         println!("{song}");
//!     }
//! }
//!
//! // Typo-tolerant lookup over "title artist genre".
//! let hits = catalog.fuzzy_search("bohemian rapsody queen rock", 2);
//! ```
//!
//! ## Error Handling
//!
//! Queries never fail; "nothing found" is an empty result. Catalog
//! mutations log storage failures and carry on with the in-memory state.
//! The lower-level [`storage`] and [`config`] functions return
//! `anyhow::Result` with context for callers that want to handle failures.
//!
//! ## Logging
//!
//! Library code logs through the `log` facade; the binary installs
//! `env_logger`, so `RUST_LOG=syncup=debug syncup list` shows catalog activity.

pub mod bktree;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod song;
pub mod storage;
pub mod taxonomy;
pub mod trie;

pub use catalog::Catalog;
pub use song::Song;
