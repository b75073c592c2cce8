//! Folder conventions: listing candidates, clearing the thumbnail folder and
//! naming results `<N>.<ext>` after the largest integer already present.

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::RgbImage;
use itertools::Itertools;

use crate::error::{MosaicError, Result};

/// Subfolders of `directory`, in natural order.
pub(crate) fn list_dirs(directory: &Path) -> Result<Vec<PathBuf>> {
    list(directory, |path| path.is_dir())
}

/// Regular files of `directory`, in natural order. Hidden files are skipped.
pub(crate) fn list_files(directory: &Path) -> Result<Vec<PathBuf>> {
    list(directory, |path| path.is_file())
}

fn list(directory: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut paths = vec![];
    for entry in fs::read_dir(directory).map_err(|e| MosaicError::storage(directory, e))? {
        let path = entry.map_err(|e| MosaicError::storage(directory, e))?.path();
        let hidden = file_name(&path).starts_with('.');
        if !hidden && keep(&path) {
            paths.push(path);
        }
    }
    Ok(paths
        .into_iter()
        .sorted_by_cached_key(|path| (natural_key(&file_name(path)), path.clone()))
        .collect())
}

/// One run of a file name: digits compare by value, text case-insensitively.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    /// Digit count without leading zeros, then the digits.
    Number(usize, String),
    Text(String),
}

/// Sort key placing `2.jpg` before `10.jpg`.
fn natural_key(name: &str) -> Vec<Chunk> {
    let runs = name.chars().chunk_by(|c| c.is_ascii_digit());
    let key = runs
        .into_iter()
        .map(|(digits, run)| {
            let run = run.collect::<String>();
            if digits {
                let value = run.trim_start_matches('0').to_string();
                Chunk::Number(value.len(), value)
            } else {
                Chunk::Text(run.to_lowercase())
            }
        })
        .collect();
    key
}

/// Display name of a path: its last component.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Create `directory` if needed and remove every file inside it.
pub(crate) fn clear_dir(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory).map_err(|e| MosaicError::storage(directory, e))?;
    for path in list(directory, |path| path.is_file())? {
        fs::remove_file(&path).map_err(|e| MosaicError::storage(&path, e))?;
    }
    Ok(())
}

/// `directory/<N>.<extension>` where N is one more than the largest integer
/// basename in `directory`. Non-numeric basenames are ignored.
pub(crate) fn next_output_path(directory: &Path, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory).map_err(|e| MosaicError::storage(directory, e))?;
    let mut max = 0u64;
    for entry in fs::read_dir(directory).map_err(|e| MosaicError::storage(directory, e))? {
        let name = entry
            .map_err(|e| MosaicError::storage(directory, e))?
            .file_name();
        let name = name.to_string_lossy();
        let stem = name.split('.').next().unwrap_or_default();
        if let Ok(n) = stem.parse::<u64>() {
            max = max.max(n);
        }
    }
    let next = max.checked_add(1).ok_or_else(|| {
        MosaicError::storage(directory, format!("no sequence number left after {max}"))
    })?;
    Ok(directory.join(format!("{next}.{extension}")))
}

/// Save `image` as the next numbered file in `directory`.
pub(crate) fn save_sequential(image: &RgbImage, directory: &Path, extension: &str) -> Result<PathBuf> {
    let path = next_output_path(directory, extension)?;
    image
        .save(&path)
        .map_err(|e| MosaicError::storage(&path, e))?;
    log::info!("saved {}", path.display());
    Ok(path)
}
