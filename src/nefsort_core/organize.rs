use crate::nefsort_core::config::{ExtensionGroup, OrganizeConfig};
use crate::nefsort_core::error::{NefsortError, Result};
use crate::nefsort_core::exif::{ExifToolCommand, MetadataReader};
use crate::nefsort_core::folder::create_folder;
use crate::nefsort_core::metadata::{get_image_datetime, parse_exif};
use crate::nefsort_core::sidecar::move_image;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of handling a single matched file.
#[derive(Debug, PartialEq, Eq)]
enum FileOutcome {
    Moved(usize),
    LeftInPlace,
}

/// Statistics from an organize run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrganizeStats {
    pub groups_moved: usize,
    pub files_moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl std::fmt::Display for OrganizeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} groups ({} files) moved, {} skipped, {} failed",
            self.groups_moved, self.files_moved, self.skipped, self.failed
        )
    }
}

/// Files RAW and preview media from a source tree into dated folders.
pub struct Organizer<R: MetadataReader> {
    source: PathBuf,
    destination: PathBuf,
    config: OrganizeConfig,
    reader: R,
}

impl<R: MetadataReader> Organizer<R> {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        config: OrganizeConfig,
        reader: R,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            config,
            reader,
        }
    }

    /// Walk the source tree once per extension group, RAW group first.
    ///
    /// Per-file failures are logged and counted; they never stop the run.
    pub fn run(&mut self) -> OrganizeStats {
        log::info!("Checking RAW files in {}", self.source.display());
        let mut stats = OrganizeStats::default();

        for group in ExtensionGroup::PASS_ORDER {
            let files = self.list_files(group);
            log::debug!("{} pass: {} candidate files", group, files.len());

            for path in files {
                // Moved along with an earlier file of its group.
                if !path.exists() {
                    continue;
                }

                let metadata = match self.reader.read_metadata(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        log::warn!("Could not open {}: {}", path.display(), e);
                        stats.skipped += 1;
                        continue;
                    }
                };

                match self.file_image(&path, &metadata) {
                    Ok(FileOutcome::Moved(0)) => {
                        log::debug!("{} is already filed", path.display());
                    }
                    Ok(FileOutcome::Moved(count)) => {
                        stats.groups_moved += 1;
                        stats.files_moved += count;
                    }
                    Ok(FileOutcome::LeftInPlace) => {
                        log::warn!(
                            "No capture date for {}, leaving it in place",
                            path.display()
                        );
                        stats.skipped += 1;
                    }
                    Err(e) => {
                        log::warn!("Caught an error for {}: {}", path.display(), e);
                        stats.failed += 1;
                    }
                }
            }
        }

        log::info!("Organize complete: {}", stats);
        stats
    }

    /// Parse one file's metadata and move its group to the dated folder.
    fn file_image(&self, path: &Path, raw_metadata: &str) -> Result<FileOutcome> {
        let record = parse_exif(raw_metadata)?;
        let taken_at = get_image_datetime(&record)?;

        match create_folder(Some(&taken_at), &self.destination)? {
            Some(to_image_folder) => {
                let moved = move_image(path, &to_image_folder, &self.config)?;
                Ok(FileOutcome::Moved(moved))
            }
            None => Ok(FileOutcome::LeftInPlace),
        }
    }

    /// Recursive listing of the files in `group`, in file name order.
    fn list_files(&self, group: ExtensionGroup) -> Vec<PathBuf> {
        let source = fs::canonicalize(&self.source).unwrap_or_else(|_| self.source.clone());
        let destination =
            fs::canonicalize(&self.destination).unwrap_or_else(|_| self.destination.clone());
        WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                !is_hidden(entry) && (entry.depth() == 0 || entry.path() != destination)
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("{}", NefsortError::from(e));
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|path| self.config.matches(group, path))
            .collect()
    }
}

/// Dot-files are skipped, except the walk root itself.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Organize `from_folder` into `to_folder` with the default extension sets,
/// reading metadata through the `exiftool` binary on `PATH`.
///
/// Both folders must already exist. Outcomes are reported through the log.
pub fn organize_raw_files(from_folder: &Path, to_folder: &Path) {
    Organizer::new(
        from_folder,
        to_folder,
        OrganizeConfig::default(),
        ExifToolCommand::default(),
    )
    .run();
}
