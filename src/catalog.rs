//! The song catalog and the indexes it keeps in step with it.
//!
//! [`Catalog`] owns the ordered song list. Every mutation goes, in order,
//! to the list, then to the three indexes ([`PrefixIndex`], [`BkTree`],
//! [`TaxonomyTree`]), then to the CSV mirror on disk. Each read query
//! consults exactly one of them.
//!
//! Storage failures are logged and swallowed: the in-memory catalog is the
//! source of truth for the rest of the session even if the file could not
//! be written.

use crate::bktree::BkTree;
use crate::song::Song;
use crate::storage;
use crate::taxonomy::TaxonomyTree;
use crate::trie::PrefixIndex;
use anyhow::Result;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    songs: Vec<Song>,
    prefix_index: PrefixIndex,
    fuzzy_index: BkTree,
    taxonomy: TaxonomyTree,
}

impl Catalog {
    /// Load the catalog mirrored at `path`.
    ///
    /// A missing file is created with the seed songs first. Unreadable rows
    /// are skipped; an I/O failure leaves the catalog with whatever was read
    /// before it. Never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut catalog = Self {
            path: path.into(),
            songs: Vec::new(),
            prefix_index: PrefixIndex::new(),
            fuzzy_index: BkTree::new(),
            taxonomy: TaxonomyTree::new(),
        };

        let path = catalog.path.clone();
        if !path.exists() {
            match storage::write_seed_file(&path) {
                Ok(()) => info!("Created catalog with seed songs at {}", path.display()),
                Err(e) => error!("{e:#}"),
            }
        }

        match storage::read_songs(&path, |song| catalog.push_indexed(song)) {
            Ok(count) => info!("Catalog loaded from {}: {count} songs", path.display()),
            Err(e) => warn!("Could not load catalog, continuing with {} songs: {e:#}", catalog.songs.len()),
        }

        catalog
    }

    /// Append `song` and index it, then rewrite the CSV.
    ///
    /// Fields are trimmed first, as they would be on reload. A song with no
    /// title is rejected and nothing changes.
    pub fn add(&mut self, song: Song) {
        let song = song.trimmed();
        if song.title.is_empty() {
            warn!("Ignoring song without a title ({song:?})");
            return;
        }
        debug!("Adding {song}");
        self.push_indexed(song);
        self.persist();
    }

    /// Remove the first song whose title matches `title` (ASCII
    /// case-insensitive), unindex it, and rewrite the CSV.
    ///
    /// Returns the removed song; an unknown title changes nothing.
    pub fn remove(&mut self, title: &str) -> Option<Song> {
        if title.is_empty() {
            return None;
        }

        let Some(position) = self.songs.iter().position(|s| s.has_title(title)) else {
            debug!("Nothing to remove for title {title:?}");
            return None;
        };

        let removed = self.songs.remove(position);
        self.unindex(&removed);
        debug!("Removed {removed}");
        self.persist();
        Some(removed)
    }

    /// Same as [`Catalog::remove`], keyed by the song's title.
    pub fn remove_song(&mut self, song: &Song) -> Option<Song> {
        self.remove(&song.title)
    }

    /// First song whose title matches, ignoring ASCII case.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.has_title(title))
    }

    /// Copy of every song, in catalog order.
    #[must_use]
    pub fn all(&self) -> Vec<Song> {
        self.songs.clone()
    }

    /// Titles of songs whose title, artist or genre starts with `prefix`.
    #[must_use]
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.prefix_index.search_by_prefix(prefix)
    }

    /// Up to `limit` songs similar to `seed`: same artist first, then the
    /// rest of its genre. The seed itself is never returned.
    #[must_use]
    pub fn recommend_similar(&self, seed: &Song, limit: usize) -> Vec<Song> {
        self.taxonomy
            .recommend(seed, limit)
            .into_iter()
            .filter(|s| !s.has_title(&seed.title))
            .take(limit)
            .collect()
    }

    /// Titles of songs whose `title artist genre` key lies within
    /// `max_distance` edits of `query`.
    #[must_use]
    pub fn fuzzy_search(&self, query: &str, max_distance: i64) -> Vec<String> {
        self.fuzzy_index.search_similar(query, max_distance)
    }

    /// Rebuild the autocomplete index from the current song list.
    pub fn rebuild_prefix_index(&mut self) {
        self.prefix_index.clear();
        for song in &self.songs {
            index_prefixes(&mut self.prefix_index, song);
        }
        debug!("Prefix index rebuilt over {} songs", self.songs.len());
    }

    /// Rebuild all three indexes from the current song list.
    pub fn rebuild_all_indexes(&mut self) {
        self.prefix_index.clear();
        self.fuzzy_index.clear();
        self.taxonomy.clear();

        for song in &self.songs {
            index_prefixes(&mut self.prefix_index, song);
            self.fuzzy_index.insert(&song.index_key(), &song.title);
            self.taxonomy.insert(song);
        }
        debug!("All indexes rebuilt over {} songs", self.songs.len());
    }

    /// Write the whole catalog to its CSV file.
    pub fn save(&self) -> Result<()> {
        storage::write_songs(&self.path, &self.songs)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn push_indexed(&mut self, song: Song) {
        index_prefixes(&mut self.prefix_index, &song);
        self.fuzzy_index.insert(&song.index_key(), &song.title);
        self.taxonomy.insert(&song);
        self.songs.push(song);
    }

    fn unindex(&mut self, removed: &Song) {
        let reference = removed.title.as_str();
        for word in [&removed.title, &removed.artist, &removed.genre] {
            self.prefix_index.remove(word, reference);
        }
        self.fuzzy_index.remove_reference(&removed.index_key(), reference);
        self.taxonomy.remove(removed);

        // Titles are the references: a remaining song with the same title
        // lost its trie and BK entries above and needs them back.
        for song in self.songs.iter().filter(|s| s.title == removed.title) {
            index_prefixes(&mut self.prefix_index, song);
            self.fuzzy_index.insert(&song.index_key(), &song.title);
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            error!("Catalog change kept in memory only: {e:#}");
        }
    }
}

fn index_prefixes(index: &mut PrefixIndex, song: &Song) {
    index.insert(&song.title, &song.title);
    index.insert(&song.artist, &song.title);
    index.insert(&song.genre, &song.title);
}
