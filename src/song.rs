//! Song model shared by the catalog and its indexes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A song as the library stores it.
///
/// Equality and hashing go through `id` only. `title` is what the catalog
/// uses as the lookup and deletion key, and what the prefix and fuzzy
/// indexes hand back as a reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Song {
    /// Derived from the title unless given explicitly.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Release year, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

impl Song {
    /// Builds a song from the three essential attributes.
    /// The `id` is derived from the title.
    #[must_use]
    pub fn new(title: impl Into<String>, artist: impl Into<String>, genre: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: derive_id(&title),
            title,
            artist: artist.into(),
            genre: genre.into(),
            year: None,
            duration_seconds: None,
        }
    }

    /// Builds a song with every attribute set. An empty `id` falls back to
    /// the derived one.
    #[must_use]
    pub fn with_details(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        year: Option<u32>,
        duration_seconds: Option<u32>,
    ) -> Self {
        let title = title.into();
        let id = id.into();
        Self {
            id: if id.is_empty() { derive_id(&title) } else { id },
            title,
            artist: artist.into(),
            genre: genre.into(),
            year,
            duration_seconds,
        }
    }

    /// Key under which the fuzzy index stores this song:
    /// `title artist genre`, lowercased.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{} {} {}", self.title, self.artist, self.genre).to_ascii_lowercase()
    }

    /// The same song with surrounding whitespace cut from title, artist and
    /// genre. A derived id follows the trimmed title.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        let derived = self.id == derive_id(&self.title);
        self.title = self.title.trim().to_string();
        self.artist = self.artist.trim().to_string();
        self.genre = self.genre.trim().to_string();
        if derived {
            self.id = derive_id(&self.title);
        }
        self
    }

    /// ASCII case-insensitive title comparison.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title)
    }
}

/// `Shape of You` -> `shape_of_you`
#[must_use]
pub fn derive_id(title: &str) -> String {
    title.to_ascii_lowercase().replace(' ', "_")
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}
