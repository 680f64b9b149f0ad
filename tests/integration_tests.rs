//! # Integration Tests for SyncUp
//!
//! End-to-end checks through the public library API and the `syncup`
//! binary, each against a scratch catalog file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use syncup::bktree::{levenshtein, BkTree};
use syncup::trie::PrefixIndex;
use syncup::{Catalog, Song};
use tempfile::TempDir;

/// Test helper: fresh directory plus the catalog path inside it (not yet created)
fn scratch_catalog_path() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("data").join("canciones.csv");
    Ok((temp_dir, path))
}

fn tuples(songs: &[Song]) -> Vec<(String, String, String)> {
    songs
        .iter()
        .map(|s| (s.title.clone(), s.artist.clone(), s.genre.clone()))
        .collect()
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_csv_round_trip_from_empty_dir() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;

        let mut catalog = Catalog::open(&path);
        assert!(path.exists(), "seed file should be created");
        assert_eq!(catalog.len(), 5);

        catalog.add(Song::new("Test", "Artist", "Pop"));

        let reloaded = Catalog::open(&path);
        let expected: Vec<(String, String, String)> = [
            ("Shape of You", "Ed Sheeran", "Pop"),
            ("Blinding Lights", "The Weeknd", "Synthwave"),
            ("Bohemian Rhapsody", "Queen", "Rock"),
            ("Someone Like You", "Adele", "Soul"),
            ("Smells Like Teen Spirit", "Nirvana", "Grunge"),
            ("Test", "Artist", "Pop"),
        ]
        .iter()
        .map(|(t, a, g)| (t.to_string(), a.to_string(), g.to_string()))
        .collect();

        assert_eq!(tuples(&reloaded.all()), expected);
        Ok(())
    }

    #[test]
    fn test_file_mirrors_memory_after_each_mutation() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;
        let mut catalog = Catalog::open(&path);

        catalog.add(Song::new("Lover", "Taylor Swift", "Pop"));
        assert_eq!(tuples(&Catalog::open(&path).all()), tuples(&catalog.all()));

        catalog.remove("shape of you");
        assert_eq!(tuples(&Catalog::open(&path).all()), tuples(&catalog.all()));

        let contents = std::fs::read_to_string(&path)?;
        assert!(contents.starts_with("titulo,artista,genero\n"));
        assert!(!contents.contains("Shape of You"));
        assert!(contents.ends_with("Lover,Taylor Swift,Pop\n"));
        Ok(())
    }

    #[test]
    fn test_indexes_consistent_with_catalog() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;
        let mut catalog = Catalog::open(&path);

        for i in 0..40 {
            catalog.add(Song::new(
                format!("Track {i:02}"),
                format!("Artist {}", i % 7),
                format!("Genre {}", i % 3),
            ));
        }
        catalog.remove("Track 13");
        catalog.remove("Track 27");

        for song in catalog.all() {
            assert!(catalog.autocomplete(&song.title).contains(&song.title), "{song} by title");
            assert!(catalog.autocomplete(&song.artist).contains(&song.title), "{song} by artist");
            assert!(catalog.fuzzy_search(&song.index_key(), 0).contains(&song.title), "{song} fuzzy");
        }

        for gone in ["Track 13", "Track 27"] {
            assert!(!catalog.autocomplete("track").contains(&gone.to_string()));
            let key = format!("{gone} artist 6 genre 1").to_ascii_lowercase();
            assert!(!catalog.fuzzy_search(&key, 5).contains(&gone.to_string()));
        }
        Ok(())
    }

    #[test]
    fn test_recommendations_stay_in_genre() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;
        let mut catalog = Catalog::open(&path);

        catalog.add(Song::new("RockA", "QueenX", "Rock"));
        catalog.add(Song::new("RockB", "QueenX", "Rock"));
        catalog.add(Song::new("RockC", "OtherY", "Rock"));

        let seed = Song::new("RockA", "QueenX", "Rock");
        let titles: Vec<String> = catalog
            .recommend_similar(&seed, 5)
            .into_iter()
            .map(|s| s.title)
            .collect();

        // "Bohemian Rhapsody" by Queen is also Rock, under a different artist bucket.
        assert_eq!(titles[0], "RockB");
        assert!(titles.contains(&"RockC".to_string()));
        assert!(titles.contains(&"Bohemian Rhapsody".to_string()));
        assert!(!titles.contains(&"RockA".to_string()));
        assert!(catalog.recommend_similar(&seed, 0).is_empty());
        Ok(())
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_trie_scenario() {
        let mut trie = PrefixIndex::new();
        trie.insert("love", "Love Story");
        trie.insert("lover", "Lover");
        trie.insert("low", "Low Motion");

        let found: HashSet<String> = trie.search_by_prefix("lo").into_iter().collect();
        let expected: HashSet<String> = ["Love Story", "Lover", "Low Motion"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
        assert!(trie.search_by_prefix("xyz").is_empty());

        trie.clear();
        assert!(trie.search_by_prefix("lo").is_empty());
    }

    #[test]
    fn test_bk_tree_against_song_keys() {
        let songs = [
            Song::new("Love Story", "Taylor Swift", "Pop"),
            Song::new("Lover", "Taylor Swift", "Pop"),
            Song::new("Loveless", "The Weekend", "RnB"),
            Song::new("Low Motion", "Dillon Francis", "EDM"),
        ];
        let mut tree = BkTree::new();
        for song in &songs {
            tree.insert(&song.index_key(), &song.title);
        }

        for query in ["lover taylor swift pop", "love story taylor swift pup", "low", "loveless the weeknd rnb"] {
            for d in 0..6 {
                let found: HashSet<String> = tree.search_similar(query, d).into_iter().collect();
                let expected: HashSet<String> = songs
                    .iter()
                    .filter(|s| levenshtein(query, &s.index_key()) <= d as usize)
                    .map(|s| s.title.clone())
                    .collect();
                assert_eq!(found, expected, "query {query:?} at distance {d}");
            }
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn syncup(catalog: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_syncup"))
            .arg("--catalog")
            .arg(catalog)
            .args(args)
            .env_remove("SYNCUP_CATALOG")
            .output()
            .expect("Failed to run syncup")
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = Command::new(env!("CARGO_BIN_EXE_syncup"))
            .arg("--help")
            .output()
            .expect("Failed to run help command");

        let text = stdout(&output);
        assert!(text.contains("syncup"));
        assert!(text.contains("complete"));
        assert!(text.contains("similar"));
        assert!(text.contains("fuzzy"));
    }

    #[test]
    fn test_list_seeds_catalog() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;

        let output = syncup(&path, &["list"]);
        assert!(output.status.success());
        let text = stdout(&output);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("Bohemian Rhapsody"));
        Ok(())
    }

    #[test]
    fn test_add_then_complete_and_similar() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;

        assert!(syncup(&path, &["add", "We Will Rock You", "Queen", "Rock"]).status.success());

        let complete = stdout(&syncup(&path, &["complete", "queen"]));
        assert_eq!(complete.lines().collect::<Vec<_>>(), vec!["Bohemian Rhapsody", "We Will Rock You"]);

        let similar = syncup(&path, &["--json", "similar", "bohemian rhapsody"]);
        assert!(similar.status.success());
        let songs: Vec<Song> = serde_json::from_slice(&similar.stdout)?;
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "We Will Rock You");
        Ok(())
    }

    #[test]
    fn test_fuzzy_and_remove() -> Result<()> {
        let (_dir, path) = scratch_catalog_path()?;

        let fuzzy = stdout(&syncup(&path, &["fuzzy", "smells like teen sprit nirvana grunge", "--distance", "1"]));
        assert_eq!(fuzzy.trim(), "Smells Like Teen Spirit");

        let removed = syncup(&path, &["remove", "SMELLS LIKE TEEN SPIRIT"]);
        assert!(removed.status.success());
        assert!(stdout(&removed).contains("Removed"));

        let after = stdout(&syncup(&path, &["list"]));
        assert_eq!(after.lines().count(), 4);
        assert!(!after.contains("Smells Like Teen Spirit"));
        Ok(())
    }

    #[test]
    fn test_completion_generation() {
        let output = Command::new(env!("CARGO_BIN_EXE_syncup"))
            .args(["completion", "bash"])
            .output()
            .expect("Failed to run completion command");

        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("_syncup"));
        assert!(text.contains("complete"));
    }
}
