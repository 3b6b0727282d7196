//! Track model, playable-reference bookkeeping and directory scanning.

mod display;
mod model;
mod object_url;
mod scan;

pub use model::{Track, TrackId, TrackSource};
pub use object_url::ObjectUrls;
pub use scan::scan;
