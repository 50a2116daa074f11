use crate::nefsort_core::config::OrganizeConfig;
use crate::nefsort_core::error::{NefsortError, Result};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

/// Suffix for copies staged in the destination before a group is committed.
const STAGING_SUFFIX: &str = "nefsort-partial";

/// A group member staged in its destination folder.
#[derive(Debug)]
struct StagedMove {
    source: PathBuf,
    staged: PathBuf,
    destination: PathBuf,
}

/// Find every file next to `primary` that shares its stem and carries a
/// recognized extension. The primary file itself is included.
///
/// Example: for "DSC_0001.NEF", finds "DSC_0001.JPG", "DSC_0001.mov", etc.
pub fn find_siblings(primary: &Path, config: &OrganizeConfig) -> Result<Vec<PathBuf>> {
    let mut siblings = Vec::new();

    let Some(stem) = primary.file_stem() else {
        return Ok(siblings);
    };
    let parent = match primary.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    for entry in fs::read_dir(parent)? {
        let path = entry?.path();
        if path.is_file() && path.file_stem() == Some(stem) && config.is_recognized(&path) {
            siblings.push(path);
        }
    }

    siblings.sort();
    Ok(siblings)
}

/// Move `primary` and its siblings into `to_image_folder`, keeping their
/// file names. Returns the number of files moved.
///
/// Every member is first copied into the destination under a hidden staging
/// name. If any copy fails the staged copies are removed and all sources stay
/// put. Once every copy is in place each one is renamed over its final name
/// and the source is deleted. A failure while committing stops the group;
/// members already committed stay moved.
pub fn move_image(primary: &Path, to_image_folder: &Path, config: &OrganizeConfig) -> Result<usize> {
    let siblings = find_siblings(primary, config)?;
    let mut staged_moves: Vec<StagedMove> = Vec::new();

    for source in siblings {
        let Some(filename) = source.file_name() else {
            continue;
        };
        let destination = to_image_folder.join(filename);

        if is_same_file(&source, &destination) {
            log::debug!("{} is already in place", source.display());
            continue;
        }

        let staged = to_image_folder.join(format!(
            ".{}.{}",
            filename.to_string_lossy(),
            STAGING_SUFFIX
        ));

        if let Err(error) = copy_with_metadata(&source, &staged) {
            remove_staged(&staged);
            discard_staged(&staged_moves);
            return Err(NefsortError::MoveFailed {
                source_path: source,
                destination,
                error,
            });
        }

        staged_moves.push(StagedMove {
            source,
            staged,
            destination,
        });
    }

    let mut moved = 0;
    for (index, staged_move) in staged_moves.iter().enumerate() {
        if let Err(error) = commit(staged_move) {
            discard_staged(&staged_moves[index..]);
            return Err(NefsortError::MoveFailed {
                source_path: staged_move.source.clone(),
                destination: staged_move.destination.clone(),
                error,
            });
        }
        moved += 1;
    }

    Ok(moved)
}

fn commit(staged_move: &StagedMove) -> std::io::Result<()> {
    log::info!(
        "{} -> {}",
        staged_move.source.display(),
        staged_move.destination.display()
    );
    fs::rename(&staged_move.staged, &staged_move.destination)?;
    fs::remove_file(&staged_move.source)
}

fn discard_staged(staged_moves: &[StagedMove]) {
    for staged_move in staged_moves {
        remove_staged(&staged_move.staged);
    }
}

/// Remove a staged copy, logging it if it has to be left behind.
fn remove_staged(staged: &Path) {
    if let Err(e) = fs::remove_file(staged) {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("Could not remove staged copy {}: {}", staged.display(), e);
        }
    }
}

/// Copy a file along with its permissions and access/modification times.
fn copy_with_metadata(source: &Path, destination: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(source)?;
    let permissions = metadata.permissions();

    fs::copy(source, destination)?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    if permissions.readonly() {
        let mut writable = permissions.clone();
        writable.set_readonly(false);
        fs::set_permissions(destination, writable)?;
    }
    File::options().write(true).open(destination)?.set_times(times)?;
    fs::set_permissions(destination, permissions)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
