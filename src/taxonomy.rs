//! Genre → artist → songs grouping behind "similar songs" suggestions.
//!
//! ```text
//! rock
//! ├─ queen       [Bohemian Rhapsody, We Will Rock You]
//! └─ pink floyd  [Comfortably Numb, Time]
//! ```
//!
//! Both levels are keyed by the ASCII-lowercased name and kept in ordered
//! maps, so walking the artists of a genre always happens in the same order
//! for the same contents.

use crate::song::Song;
use log::trace;
use std::collections::BTreeMap;

#[derive(Debug)]
struct GenreNode {
    /// Name as first seen, for display.
    name: String,
    artists: BTreeMap<String, ArtistNode>,
}

#[derive(Debug)]
struct ArtistNode {
    name: String,
    /// Insertion order doubles as the tie-break when recommending.
    songs: Vec<Song>,
}

#[derive(Debug, Default)]
pub struct TaxonomyTree {
    genres: BTreeMap<String, GenreNode>,
}

impl TaxonomyTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, song: &Song) {
        let genre = self
            .genres
            .entry(song.genre.to_ascii_lowercase())
            .or_insert_with(|| GenreNode {
                name: song.genre.clone(),
                artists: BTreeMap::new(),
            });

        genre
            .artists
            .entry(song.artist.to_ascii_lowercase())
            .or_insert_with(|| ArtistNode {
                name: song.artist.clone(),
                songs: Vec::new(),
            })
            .songs
            .push(song.clone());
    }

    /// Up to `limit` songs resembling `seed`, never the seed itself.
    ///
    /// The seed's own artist (within its genre) is drained first; remaining
    /// slots are filled from the other artists of the same genre. A genre
    /// the tree has never seen gives an empty list.
    #[must_use]
    pub fn recommend(&self, seed: &Song, limit: usize) -> Vec<Song> {
        let mut picked = Vec::new();
        if limit == 0 {
            return picked;
        }

        let Some(genre) = self.genres.get(&seed.genre.to_ascii_lowercase()) else {
            trace!("No genre bucket for {:?}", seed.genre);
            return picked;
        };
        let artist_key = seed.artist.to_ascii_lowercase();

        let same_artist = genre.artists.get(&artist_key).into_iter();
        let other_artists = genre
            .artists
            .iter()
            .filter(|(key, _)| **key != artist_key)
            .map(|(_, node)| node);

        let candidates = same_artist
            .chain(other_artists)
            .flat_map(|node| node.songs.iter())
            .filter(|song| !song.has_title(&seed.title));

        picked.extend(candidates.take(limit).cloned());
        picked
    }

    /// Remove the first song in `song`'s (genre, artist) bucket whose title
    /// matches, dropping buckets that end up empty. Returns whether anything
    /// was removed.
    pub fn remove(&mut self, song: &Song) -> bool {
        let genre_key = song.genre.to_ascii_lowercase();
        let artist_key = song.artist.to_ascii_lowercase();

        let Some(genre) = self.genres.get_mut(&genre_key) else {
            return false;
        };
        let Some(artist) = genre.artists.get_mut(&artist_key) else {
            return false;
        };
        let Some(position) = artist.songs.iter().position(|s| s.has_title(&song.title)) else {
            return false;
        };

        artist.songs.remove(position);
        if artist.songs.is_empty() {
            genre.artists.remove(&artist_key);
        }
        if genre.artists.is_empty() {
            self.genres.remove(&genre_key);
        }
        true
    }

    /// Display names of every genre, ordered by their lowercase form.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        self.genres.values().map(|g| g.name.as_str()).collect()
    }

    /// Display names of the artists filed under `genre`.
    #[must_use]
    pub fn artists_in(&self, genre: &str) -> Vec<&str> {
        self.genres
            .get(&genre.to_ascii_lowercase())
            .map(|g| g.artists.values().map(|a| a.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.genres.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}
