use super::model::TrackSource;

/// Build the name shown for a track.
///
/// Local files use their file name (with extension, as picked). URLs use
/// their last non-empty path segment without query or fragment, falling
/// back to the whole URL.
pub fn display_name(source: &TrackSource) -> String {
    match source {
        TrackSource::File(path) => path
            .file_name()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string()),
        TrackSource::Url(url) => {
            let without_scheme = url.split_once("://").map_or(url.as_str(), |(_, rest)| rest);
            let path = without_scheme
                .split(['?', '#'])
                .next()
                .unwrap_or(without_scheme);
            match path.split_once('/') {
                Some((_, tail)) => tail
                    .rsplit('/')
                    .find(|seg| !seg.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| url.clone()),
                None => url.clone(),
            }
        }
    }
}
