//! # SyncUp - Indexed Music Library
//!
//! Command-line front end over the CSV-backed catalog.
//!
//! ## Usage
//!
//! ```bash
//! # Show the catalog
//! syncup list
//!
//! # Add and remove songs
//! syncup add "Lover" "Taylor Swift" Pop
//! syncup remove "lover"
//!
//! # Query the indexes
//! syncup complete tay
//! syncup similar "Bohemian Rhapsody"
//! syncup fuzzy "smells like teen sprit nirvana grunge"
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use serde::Serialize;
use syncup::catalog::Catalog;
use syncup::cli::{self, Command};
use syncup::completion;
use syncup::config::RuntimeConfig;
use syncup::song::Song;

/// Main entry point for the SyncUp application.
///
/// Initializes logging, parses command-line arguments, opens the catalog
/// and routes the command to it.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug syncup list` - Enable debug logging
/// - `RUST_LOG=syncup::bktree=trace syncup fuzzy ...` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completion scripts don't need the catalog.
    match args.command {
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
            return Ok(());
        }
        Command::CompletionEnhanced { shell } => {
            return match shell {
                cli::Shell::Bash => {
                    completion::generate_enhanced_bash_completion();
                    Ok(())
                }
                _ => Err(anyhow::anyhow!("Enhanced completions only supported for bash")),
            };
        }
        _ => {}
    }

    let config = match &args.catalog {
        Some(path) => RuntimeConfig::with_catalog_path(path)?,
        None => RuntimeConfig::default(),
    };
    debug!("Using catalog at {}", config.catalog_path.display());

    let mut catalog = Catalog::open(&config.catalog_path);
    let json = args.json;

    match args.command {
        Command::List => {
            print_songs(&catalog.all(), json)?;
        }
        Command::Add { title, artist, genre, year, duration } => {
            if title.trim().is_empty() {
                return Err(anyhow::anyhow!("Song title cannot be empty"));
            }
            let song = Song::with_details("", title.trim(), artist.trim(), genre.trim(), year, duration);
            info!("Adding {song}");
            println!("Added: {song}");
            catalog.add(song);
        }
        Command::Remove { title } => match catalog.remove(&title) {
            Some(song) => println!("Removed: {song}"),
            None => println!("No song titled \"{title}\""),
        },
        Command::Find { title } => match catalog.find_by_title(&title) {
            Some(song) => print_songs(std::slice::from_ref(song), json)?,
            None => println!("No song titled \"{title}\""),
        },
        Command::Complete { prefix } => {
            print_titles(&catalog.autocomplete(&prefix), json)?;
        }
        Command::Similar { title, limit } => match catalog.find_by_title(&title).cloned() {
            Some(seed) => {
                info!("Finding up to {limit} songs similar to {seed}");
                print_songs(&catalog.recommend_similar(&seed, limit), json)?;
            }
            None => println!("No song titled \"{title}\""),
        },
        Command::Fuzzy { query, distance } => {
            print_titles(&catalog.fuzzy_search(&query, distance), json)?;
        }
        Command::Reindex => {
            catalog.rebuild_all_indexes();
            catalog.save()?;
            println!("Reindexed {} songs into {}", catalog.len(), catalog.path().display());
        }
        Command::CompleteTitles { prefix } => {
            completion::print_title_completions(&catalog, prefix.as_deref())?;
        }
        Command::Completion { .. } | Command::CompletionEnhanced { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn print_songs(songs: &[Song], json: bool) -> Result<()> {
    if json {
        return print_json(&songs);
    }

    for song in songs {
        let mut line = format!("{:<32} {:<24} {}", song.title, song.artist, song.genre);
        if let Some(year) = song.year {
            line.push_str(&format!(" ({year})"));
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn print_titles(titles: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(&titles);
    }

    for title in titles {
        println!("{title}");
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
