//! Temporary playable references derived from track sources.
//!
//! Every track holds one `ObjectUrl` registered in a shared `ObjectUrls`
//! registry. The engine plays a track through the URL's `blob:` string, which
//! only resolves while the registration is live. The registration is revoked
//! when the `ObjectUrl` is dropped, so the registry's live count is exactly the
//! number of tracks still alive.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::trace;

use super::model::TrackSource;

const SCHEME_PREFIX: &str = "blob:barline/";

// Unique across registries, so a URL never resolves in a registry that did
// not create it.
static NEXT_URL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Default)]
struct Registry {
    live: HashMap<u64, TrackSource>,
}

/// Shared registry of live object URLs.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrls {
    inner: Arc<Mutex<Registry>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` and return the owning handle.
    pub fn create(&self, source: &TrackSource) -> ObjectUrl {
        let id = NEXT_URL_ID.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut reg) = self.inner.lock() {
            reg.live.insert(id, source.clone());
        }
        trace!(id, %source, "object url created");
        ObjectUrl {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Look up the source behind a `blob:` URL. `None` once it is revoked,
    /// or when this registry never issued it.
    pub fn resolve(&self, href: &str) -> Option<TrackSource> {
        let id: u64 = href.strip_prefix(SCHEME_PREFIX)?.parse().ok()?;
        self.inner
            .lock()
            .ok()
            .and_then(|reg| reg.live.get(&id).cloned())
    }

    /// Number of URLs that have been created and not yet released.
    pub fn live_count(&self) -> usize {
        self.inner.lock().map(|reg| reg.live.len()).unwrap_or(0)
    }
}

/// Owning handle to one registry entry. Not `Clone`: there is exactly one
/// owner, and releasing happens on drop.
pub struct ObjectUrl {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectUrl({self})")
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME_PREFIX}{}", self.id)
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            if let Ok(mut reg) = reg.lock() {
                reg.live.remove(&self.id);
            }
        }
        trace!(id = self.id, "object url revoked");
    }
}
