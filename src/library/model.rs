use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::display::display_name;
use super::object_url::{ObjectUrl, ObjectUrls};

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a playlist entry.
///
/// Two entries created from the same file are still distinct tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(u64);

impl TrackId {
    fn next() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a track's audio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    File(PathBuf),
    /// A raw URL string, kept as typed.
    Url(String),
}

impl TrackSource {
    /// Interpret user input as a source. No existence or format checks are made.
    ///
    /// `file://` URLs and `~/` prefixes resolve to local paths; anything else
    /// containing `://` is kept as a URL.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(path) = input.strip_prefix("file://") {
            return Some(Self::File(PathBuf::from(path)));
        }
        if input.contains("://") {
            return Some(Self::Url(input.to_string()));
        }
        if let Some(rest) = input.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return Some(Self::File(PathBuf::from(home).join(rest)));
            }
        }
        Some(Self::File(PathBuf::from(input)))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p),
            Self::Url(_) => None,
        }
    }
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// A playlist entry. Immutable once created.
///
/// Dropping a `Track` releases its object URL.
#[derive(Debug)]
pub struct Track {
    id: TrackId,
    display_name: String,
    source: TrackSource,
    url: ObjectUrl,
}

impl Track {
    pub fn new(source: TrackSource, urls: &ObjectUrls) -> Self {
        let url = urls.create(&source);
        Self {
            id: TrackId::next(),
            display_name: display_name(&source),
            source,
            url,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn source(&self) -> &TrackSource {
        &self.source
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.url
    }
}
