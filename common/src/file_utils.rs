//! File utility functions for listing and filtering files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Raster image extensions understood by the image loader.
pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    extensions.contains(&ext.to_lowercase().as_str())
}

/// Returns paths to all files in a directory matching the given extensions.
/// Extensions are matched case-insensitively. The result is sorted.
pub fn files_with_extensions(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Like [`files_with_extensions`], but descends into subdirectories.
pub fn walk_files_with_extensions(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() && has_extension(&path, extensions) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
