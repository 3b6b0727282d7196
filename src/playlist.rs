//! Ordered, mutable list of tracks with a "now playing" selection.
//!
//! The selection is stored as a `TrackId`, not a position, and resolved to
//! an index only when needed. Removing or inserting other tracks therefore
//! never moves the selection onto a different song.

use thiserror::Error;
use tracing::debug;

use crate::library::{Track, TrackId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("no track at position {index} (playlist has {len})")]
    InvalidIndex { index: usize, len: usize },
}

#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<TrackId>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Add `track` at the end and return its position. Duplicates are allowed.
    pub fn append(&mut self, track: Track) -> usize {
        let index = self.tracks.len();
        debug!(index, id = %track.id(), name = track.display_name(), "track appended");
        self.tracks.push(track);
        index
    }

    /// Remove and return the track at `index`; later tracks shift down by one.
    ///
    /// Removing the selected track clears the selection.
    pub fn remove_at(&mut self, index: usize) -> Result<Track, PlaylistError> {
        self.check(index)?;
        let track = self.tracks.remove(index);
        if self.current == Some(track.id()) {
            self.current = None;
        }
        debug!(index, id = %track.id(), "track removed");
        Ok(track)
    }

    /// Make the track at `index` the current one.
    pub fn select(&mut self, index: usize) -> Result<&Track, PlaylistError> {
        self.check(index)?;
        let track = &self.tracks[index];
        self.current = Some(track.id());
        Ok(track)
    }

    /// Position of the current track, if it is still in the list.
    pub fn current_index(&self) -> Option<usize> {
        let id = self.current?;
        self.position_of(id)
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_index().map(|i| &self.tracks[i])
    }

    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id() == id)
    }

    /// Position `next()` would select, without selecting it.
    ///
    /// Wraps from the last track to the first; with no selection the first
    /// track is next. `None` when the playlist is empty.
    pub fn next_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.current_index() {
            Some(i) => Some((i + 1) % self.tracks.len()),
            None => Some(0),
        }
    }

    /// Position `previous()` would select, without selecting it.
    ///
    /// Wraps from the first track to the last; with no selection the last
    /// track is previous. `None` when the playlist is empty.
    pub fn previous_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let last = self.tracks.len() - 1;
        match self.current_index() {
            Some(0) | None => Some(last),
            Some(i) => Some(i - 1),
        }
    }

    /// Select the next track (wrapping). No-op on an empty playlist.
    pub fn next(&mut self) -> Option<&Track> {
        let i = self.next_index()?;
        self.select(i).ok()
    }

    /// Select the previous track (wrapping). No-op on an empty playlist.
    pub fn previous(&mut self) -> Option<&Track> {
        let i = self.previous_index()?;
        self.select(i).ok()
    }

    fn check(&self, index: usize) -> Result<(), PlaylistError> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlaylistError::InvalidIndex {
                index,
                len: self.tracks.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests;
