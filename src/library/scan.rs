use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Configured extensions, lowercased and without leading dots.
fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    exts.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Collect the audio files under `dir`, sorted case-insensitively by file name.
///
/// If `dir` is itself a file it is returned as-is, without an extension check:
/// an explicitly named file is the user's choice.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    if dir.is_file() {
        return vec![dir.to_path_buf()];
    }

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // depth 1 is the directory's own entries
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let exts = normalized_extensions(settings);
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, &exts))
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    debug!(dir = %dir.display(), found = files.len(), "library scan finished");
    files
}
