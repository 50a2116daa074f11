pub mod cli;
pub mod config;
pub mod error;
pub mod exif;
pub mod folder;
pub mod metadata;
pub mod organize;
pub mod sidecar;

pub use cli::Cli;
pub use config::{ExtensionGroup, OrganizeConfig};
pub use error::NefsortError;
pub use exif::{ExifToolCommand, ExifToolSession, MetadataReader, exiftool_available};
pub use folder::create_folder;
pub use metadata::{MetadataRecord, MetadataValue, get_image_datetime, parse_exif};
pub use organize::{OrganizeStats, Organizer, organize_raw_files};
pub use sidecar::move_image;
