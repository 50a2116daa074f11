use crate::nefsort_core::config::{DEFAULT_PREVIEW_EXTENSIONS, DEFAULT_RAW_EXTENSIONS};
use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

/// Default source folder, relative to the home directory.
pub const DEFAULT_SOURCE_DIR: &[&str] = &["Pictures", "Nikon Transfer 2"];

/// Default target folder, relative to the home directory.
pub const DEFAULT_TARGET_DIR: &[&str] = &["Pictures", "RAW"];

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Organize RAW files by date based on EXIF data",
    after_help = "Examples:\n  \
        nefsort \"/path/to/source\" \"/path/to/target\"\n  \
        nefsort --source \"$HOME/Pictures/Nikon Transfer 2\" --target \"$HOME/Pictures/RAW\""
)]
pub struct Cli {
    /// Source folder containing RAW files to organize
    pub source: Option<PathBuf>,

    /// Target folder where organized files will be moved
    pub target: Option<PathBuf>,

    /// Source folder (alternative to positional argument)
    #[arg(short = 's', long = "source", value_name = "SOURCE")]
    pub source_flag: Option<PathBuf>,

    /// Target folder (alternative to positional argument)
    #[arg(short = 't', long = "target", value_name = "TARGET")]
    pub target_flag: Option<PathBuf>,

    /// RAW and video extensions, comma-separated
    #[arg(long = "raw-ext", value_delimiter = ',', default_values_t = DEFAULT_RAW_EXTENSIONS.iter().map(|e| e.to_string()))]
    pub raw_extensions: Vec<String>,

    /// Preview image extensions, comma-separated
    #[arg(long = "preview-ext", value_delimiter = ',', default_values_t = DEFAULT_PREVIEW_EXTENSIONS.iter().map(|e| e.to_string()))]
    pub preview_extensions: Vec<String>,

    /// exiftool program used to read metadata
    #[arg(long, default_value = "exiftool")]
    pub exiftool: PathBuf,

    /// Keep a single exiftool process open for the whole run
    #[arg(long)]
    pub stay_open: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable file logging to nefsort.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Source folder, preferring the flag form over the positional one.
    pub fn source_dir(&self) -> Option<&PathBuf> {
        self.source_flag.as_ref().or(self.source.as_ref())
    }

    /// Target folder, preferring the flag form over the positional one.
    pub fn target_dir(&self) -> Option<&PathBuf> {
        self.target_flag.as_ref().or(self.target.as_ref())
    }
}
