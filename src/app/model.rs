//! Application model: `App` ties the playlist, the playback engine and the
//! visualizer together and holds the transient UI state (cursor, add
//! prompt, status line).

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{MediaBackend, MediaEvent, PlaybackEngine, PlayerError};
use crate::config::{ControlsSettings, Settings};
use crate::library::{ObjectUrls, Track, TrackSource};
use crate::playlist::{Playlist, PlaylistError};
use crate::visualizer::Visualizer;

/// Any failure of a user command. Shown in the status line, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Playlist(#[from] PlaylistError),
    #[error("nothing to add")]
    EmptyInput,
}

pub struct App<B: MediaBackend> {
    playlist: Playlist,
    engine: PlaybackEngine<B>,
    visualizer: Visualizer,
    urls: ObjectUrls,
    controls: ControlsSettings,
    header: String,

    cursor: usize,
    input: Option<String>,
    status: Option<String>,
}

impl<B: MediaBackend> App<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            playlist: Playlist::new(),
            engine: PlaybackEngine::new(backend, settings.audio.default_volume),
            visualizer: Visualizer::new(&settings.visualizer),
            urls: ObjectUrls::new(),
            controls: settings.controls.clone(),
            header: settings.ui.header_text.clone(),
            cursor: 0,
            input: None,
            status: None,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn engine(&self) -> &PlaybackEngine<B> {
        &self.engine
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn urls(&self) -> &ObjectUrls {
        &self.urls
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text typed into the add prompt, if it is open.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Name of the track held by the engine.
    pub fn now_playing(&self) -> Option<&str> {
        self.engine.loaded().map(|t| t.name.as_str())
    }

    /// Append a track for `source`. Returns its index.
    pub fn add_source(&mut self, source: TrackSource) -> usize {
        let track = Track::new(source, &self.urls);
        debug!(track = %track.id(), source = %track.source(), "added");
        self.playlist.append(track)
    }

    /// Load and start the track at `index`.
    ///
    /// The selection is only committed once the engine accepted the track,
    /// so a failed load leaves the previous track playing.
    pub fn select_and_play(&mut self, index: usize) -> Result<(), CommandError> {
        let track = self.playlist.get(index).ok_or(PlaylistError::InvalidIndex {
            index,
            len: self.playlist.len(),
        })?;
        self.engine.load(track, &self.urls)?;
        self.playlist.select(index)?;
        self.cursor = index;

        // the old analysis session must not outlive the old handle
        self.visualizer.attach(self.engine.tap());
        self.visualizer.on_pause();

        self.engine.play()?;
        self.visualizer.on_play();
        Ok(())
    }

    pub fn play_cursor(&mut self) -> Result<(), CommandError> {
        self.select_and_play(self.cursor)
    }

    pub fn play_pause(&mut self) -> Result<(), CommandError> {
        if self.engine.toggle()? {
            self.visualizer.on_play();
        } else {
            self.visualizer.on_pause();
        }
        Ok(())
    }

    /// Play the next track, wrapping at the end. No-op on an empty playlist.
    pub fn next_track(&mut self) -> Result<(), CommandError> {
        match self.playlist.next_index() {
            Some(index) => self.select_and_play(index),
            None => Ok(()),
        }
    }

    /// Play the previous track, wrapping at the start.
    pub fn previous_track(&mut self) -> Result<(), CommandError> {
        match self.playlist.previous_index() {
            Some(index) => self.select_and_play(index),
            None => Ok(()),
        }
    }

    /// Remove the track under the cursor. Removing the current track stops
    /// playback.
    pub fn remove_at_cursor(&mut self) -> Result<(), CommandError> {
        let removed = self.playlist.remove_at(self.cursor)?;
        if self.engine.loaded().map(|t| t.id) == Some(removed.id()) {
            self.engine.unload();
            self.visualizer.on_pause();
            self.visualizer.attach(None);
        }
        info!(track = %removed.id(), name = removed.display_name(), "removed");
        drop(removed);

        if self.cursor >= self.playlist.len() {
            self.cursor = self.playlist.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn seek_forward(&mut self) {
        self.engine.seek_by(self.controls.scrub_seconds as f64);
    }

    pub fn seek_backward(&mut self) {
        self.engine.seek_by(-(self.controls.scrub_seconds as f64));
    }

    pub fn volume_up(&mut self) {
        let v = self.engine.state().volume + self.controls.volume_step;
        self.engine.set_volume(v);
    }

    pub fn volume_down(&mut self) {
        let v = self.engine.state().volume - self.controls.volume_step;
        self.engine.set_volume(v);
    }

    pub fn toggle_style(&mut self) {
        self.visualizer.toggle_style();
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn open_input(&mut self) {
        self.input = Some(String::new());
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.pop();
        }
    }

    /// Close the prompt and add what was typed. Returns the new index.
    pub fn submit_input(&mut self) -> Result<usize, CommandError> {
        let input = self.input.take().unwrap_or_default();
        let source = TrackSource::parse(&input).ok_or(CommandError::EmptyInput)?;
        Ok(self.add_source(source))
    }

    /// Record the outcome of a command in the status line.
    pub fn report<T>(&mut self, result: Result<T, CommandError>) {
        match result {
            Ok(_) => self.status = None,
            Err(e) => {
                warn!(error = %e, "command failed");
                self.status = Some(e.to_string());
            }
        }
    }

    /// One loop iteration: apply playback events, then run the visualizer
    /// frame. Returns whether a frame was drawn.
    pub fn tick(&mut self) -> bool {
        for event in self.engine.pump() {
            if event == MediaEvent::Ended {
                info!("playback ended");
                self.visualizer.on_pause();
            }
        }
        let is_playing = self.engine.state().is_playing;
        self.visualizer.tick(self.engine.tap(), is_playing)
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut PlaybackEngine<B> {
        &mut self.engine
    }
}
