use crate::nefsort_core::error::{NefsortError, Result};
use exiftool::ExifTool;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of raw `Label : Value` metadata text for a single file.
pub trait MetadataReader {
    fn read_metadata(&mut self, path: &Path) -> Result<String>;
}

/// Runs one exiftool process per file and captures its stdout.
#[derive(Debug, Clone)]
pub struct ExifToolCommand {
    program: OsString,
}

impl ExifToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ExifToolCommand {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl MetadataReader for ExifToolCommand {
    fn read_metadata(&mut self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|e| NefsortError::Extraction {
                path: path.to_path_buf(),
                reason: format!("could not launch {}: {}", self.program.to_string_lossy(), e),
            })?;

        if !output.status.success() {
            return Err(NefsortError::Extraction {
                path: path.to_path_buf(),
                reason: format!(
                    "{} ({})",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads metadata through a single long-lived exiftool process.
///
/// The process is started on first use and restarted on the next read after
/// a failed one, so a crashed exiftool only costs the file it was reading.
pub struct ExifToolSession {
    program: PathBuf,
    exiftool: Option<ExifTool>,
}

impl ExifToolSession {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            exiftool: None,
        }
    }
}

impl Default for ExifToolSession {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl MetadataReader for ExifToolSession {
    fn read_metadata(&mut self, path: &Path) -> Result<String> {
        let extraction_error = |reason: String| NefsortError::Extraction {
            path: path.to_path_buf(),
            reason,
        };

        if self.exiftool.is_none() {
            let exiftool = ExifTool::with_executable(&self.program).map_err(|e| {
                extraction_error(format!(
                    "could not start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;
            self.exiftool = Some(exiftool);
        }
        let Some(exiftool) = self.exiftool.as_mut() else {
            return Err(extraction_error("ExifTool not available".to_string()));
        };

        let path_str = path
            .to_str()
            .ok_or_else(|| extraction_error("path is not valid UTF-8".to_string()))?;
        match exiftool.execute_raw(&[path_str]) {
            Ok(stdout) => Ok(String::from_utf8_lossy(&stdout).into_owned()),
            Err(e) => {
                self.exiftool = None;
                Err(extraction_error(e.to_string()))
            }
        }
    }
}

/// Check if the given exiftool binary can be launched.
pub fn exiftool_available(program: &OsStr) -> bool {
    Command::new(program)
        .arg("-ver")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
