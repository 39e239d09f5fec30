//! Saving rendered frames without overwriting earlier exports.

use crate::error::{Error, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// File name used for exported frames, before any suffix.
pub const EXPORT_FILE_NAME: &str = "out.png";

const MAX_ATTEMPTS: usize = 10_000;

/// Returns `path` if nothing exists there, otherwise the first free
/// `stem (n).ext` next to it, counting `n` up from 0.
pub fn unique_filename(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    (0..MAX_ATTEMPTS)
        .map(|suffix| path.with_file_name(format!("{stem} ({suffix}){extension}")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::NoUniqueFilename(path.to_path_buf()))
}

/// Writes `frame` into `out_dir` under a fresh name and returns where.
pub fn save_frame(frame: &RgbImage, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = unique_filename(&out_dir.join(EXPORT_FILE_NAME))?;
    frame.save(&path)?;
    log::info!("Exported treasure map to {}.", path.display());
    Ok(path)
}
