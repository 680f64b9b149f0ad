//! CSV mirror of the catalog.
//!
//! The file is a plain three-column table with a header line:
//!
//! ```text
//! titulo,artista,genero
//! Shape of You,Ed Sheeran,Pop
//! ```
//!
//! There is no quoting. Commas and line breaks are stripped from fields on
//! write, and a row is split on its first two commas on read, so anything
//! after the second comma belongs to the genre.

use crate::song::Song;
use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Header line written at the top of every catalog file.
pub const HEADER: [&str; 3] = ["titulo", "artista", "genero"];

/// Rows written when a catalog file does not exist yet.
pub const SEED_SONGS: [(&str, &str, &str); 5] = [
    ("Shape of You", "Ed Sheeran", "Pop"),
    ("Blinding Lights", "The Weeknd", "Synthwave"),
    ("Bohemian Rhapsody", "Queen", "Rock"),
    ("Someone Like You", "Adele", "Soul"),
    ("Smells Like Teen Spirit", "Nirvana", "Grunge"),
];

/// Songs of the seeded catalog, in file order.
#[must_use]
pub fn seed_songs() -> Vec<Song> {
    SEED_SONGS
        .iter()
        .map(|(title, artist, genre)| Song::new(*title, *artist, *genre))
        .collect()
}

/// Create `path` holding the seeded rows, along with any missing parent
/// directories.
pub fn write_seed_file(path: &Path) -> Result<()> {
    write_songs(path, &seed_songs())
        .with_context(|| format!("Failed to create initial catalog at {}", path.display()))
}

/// Stream every well-formed row of `path` into `on_song`.
///
/// Rows with fewer than three fields or an empty title are skipped with a
/// warning. Songs delivered before an I/O error stay delivered; the error is
/// returned afterwards. Returns the number of songs delivered.
pub fn read_songs(path: &Path, mut on_song: impl FnMut(Song)) -> Result<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;

    let mut delivered = 0;
    for (row, record) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = row + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e).with_context(|| format!("Failed reading {} at line {line}", path.display()));
            }
            Err(e) => {
                warn!("Skipping unreadable row {line} in {}: {e}", path.display());
                continue;
            }
        };

        match parse_record(&record) {
            Some(song) => {
                on_song(song);
                delivered += 1;
            }
            None => warn!("Skipping malformed row {line} in {}: {:?}", path.display(), record),
        }
    }

    debug!("Read {delivered} songs from {}", path.display());
    Ok(delivered)
}

fn parse_record(record: &StringRecord) -> Option<Song> {
    if record.len() < 3 {
        return None;
    }

    let title = record.get(0)?.trim();
    if title.is_empty() {
        return None;
    }
    let artist = record.get(1)?.trim();
    let genre = record.iter().skip(2).collect::<Vec<_>>().join(",");

    Some(Song::new(title, artist, genre.trim()))
}

/// Replace the contents of `path` with the header followed by one row per
/// song, in order.
pub fn write_songs(path: &Path, songs: &[Song]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create catalog directory {}", parent.display()))?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_path(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;

    writer
        .write_record(HEADER)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    for song in songs {
        writer
            .write_record([
                sanitize_field(&song.title),
                sanitize_field(&song.artist),
                sanitize_field(&song.genre),
            ])
            .with_context(|| format!("Failed to write {song} to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    debug!("Wrote {} songs to {}", songs.len(), path.display());
    Ok(())
}

/// Fields cannot carry the separator or a line break.
fn sanitize_field(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ',' | '\n' | '\r'))
        .collect()
}
