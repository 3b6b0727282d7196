use std::path::Path;

use tracing::info;

use crate::app::App;
use crate::audio::MediaBackend;
use crate::config::LibrarySettings;
use crate::library::{TrackSource, scan};

/// Fill the playlist from the start-up path (a file or a directory).
/// Returns how many tracks were added.
pub fn preload_tracks<B: MediaBackend>(
    app: &mut App<B>,
    path: &Path,
    library: &LibrarySettings,
) -> usize {
    let found = scan(path, library);
    let count = found.len();
    for file in found {
        app.add_source(TrackSource::File(file));
    }
    info!(path = %path.display(), count, "playlist preloaded");
    count
}
