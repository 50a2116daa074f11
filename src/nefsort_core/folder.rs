use crate::nefsort_core::error::{NefsortError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use time::PrimitiveDateTime;

/// Year folder name (YYYY).
pub const YEAR_FOLDER_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]");

/// Date folder name (YYYY-MM-DD).
pub const DATE_FOLDER_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Destination folder for a capture time: `{base}/{YYYY}/{YYYY-MM-DD}`.
pub fn date_folder_path(taken_at: &PrimitiveDateTime, base_folder: &Path) -> Result<PathBuf> {
    let format_error = |e: time::error::Format| NefsortError::InvalidDateFormat {
        value: taken_at.to_string(),
        reason: e.to_string(),
    };
    let year = taken_at.format(YEAR_FOLDER_FORMAT).map_err(format_error)?;
    let date = taken_at.format(DATE_FOLDER_FORMAT).map_err(format_error)?;
    Ok(base_folder.join(year).join(date))
}

/// Make sure the year and date folders for `taken_at` exist under
/// `base_folder` and return the date folder.
///
/// Without a timestamp nothing is created and `None` is returned, leaving the
/// file group where it is.
pub fn create_folder(
    taken_at: Option<&PrimitiveDateTime>,
    base_folder: &Path,
) -> Result<Option<PathBuf>> {
    let Some(taken_at) = taken_at else {
        return Ok(None);
    };

    let folder_date = date_folder_path(taken_at, base_folder)?;

    if let Some(folder_year) = folder_date.parent() {
        ensure_dir(folder_year)?;
    }

    if ensure_dir(&folder_date)? {
        log::info!("Creating new folder: {}", folder_date.display());
    }

    Ok(Some(folder_date))
}

/// Create `dir` if it is not already a directory. Returns whether it was created.
fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    match fs::create_dir(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
