//! Local file discovery
//!
//! Walks a directory tree and collects files whose names end with one of the
//! configured extensions, compared case-insensitively.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Recursively collect files under `root` matching any of `extensions`
///
/// Symlinked directories are not followed. Unreadable subdirectories are
/// logged and skipped; an unreadable `root` is an error.
pub fn find_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let suffixes: Vec<String> = extensions.iter().map(|ext| suffix_for(ext)).collect();

    let mut files = Vec::new();
    let entries = fs::read_dir(root)?;
    walk(entries, &suffixes, &mut files);

    tracing::debug!(root = %root.display(), count = files.len(), "Scan finished");
    Ok(files)
}

fn walk(entries: fs::ReadDir, suffixes: &[String], files: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => walk(children, suffixes, files),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable directory"
                    );
                }
            }
        } else if path.is_file() && has_suffix(&entry.file_name().to_string_lossy(), suffixes) {
            files.push(path);
        }
    }
}

/// Lowercased `.ext` suffix for an extension given with or without a dot
fn suffix_for(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.').to_lowercase())
}

/// Check whether a file name ends with any of the suffixes, ignoring case
fn has_suffix(file_name: &str, suffixes: &[String]) -> bool {
    let lower = file_name.to_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix.as_str()))
}
