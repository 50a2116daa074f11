use crate::nefsort_core::error::{NefsortError, Result};
use std::path::Path;

/// RAW image and video extensions (lowercase).
pub const DEFAULT_RAW_EXTENSIONS: &[&str] = &["nef", "mov"];

/// Preview image extensions (lowercase).
pub const DEFAULT_PREVIEW_EXTENSIONS: &[&str] = &["jpg", "hif"];

/// Extension group visited by one organizer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionGroup {
    Raw,
    Preview,
}

impl ExtensionGroup {
    /// Passes in the order they must run. RAW files go first so their
    /// previews leave with them and are never picked up as orphans.
    pub const PASS_ORDER: [ExtensionGroup; 2] = [ExtensionGroup::Raw, ExtensionGroup::Preview];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionGroup::Raw => "RAW",
            ExtensionGroup::Preview => "preview",
        }
    }
}

impl std::fmt::Display for ExtensionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recognized extensions for each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeConfig {
    pub raw_extensions: Vec<String>,
    pub preview_extensions: Vec<String>,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            raw_extensions: DEFAULT_RAW_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            preview_extensions: DEFAULT_PREVIEW_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl OrganizeConfig {
    /// Build a config from user-supplied extension lists.
    /// Entries are lowercased and stripped of a leading dot.
    pub fn new<R, P>(raw_extensions: R, preview_extensions: P) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let config = Self {
            raw_extensions: normalize(raw_extensions),
            preview_extensions: normalize(preview_extensions),
        };

        if config.raw_extensions.is_empty() && config.preview_extensions.is_empty() {
            return Err(NefsortError::Argument(
                "at least one RAW or preview extension is required".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn extensions(&self, group: ExtensionGroup) -> &[String] {
        match group {
            ExtensionGroup::Raw => &self.raw_extensions,
            ExtensionGroup::Preview => &self.preview_extensions,
        }
    }

    /// Check whether a path's extension belongs to the given group.
    pub fn matches(&self, group: ExtensionGroup, path: &Path) -> bool {
        has_extension(path, self.extensions(group))
    }

    /// Check whether a path's extension belongs to any group.
    pub fn is_recognized(&self, path: &Path) -> bool {
        ExtensionGroup::PASS_ORDER
            .iter()
            .any(|group| self.matches(*group, path))
    }
}

fn normalize<I>(extensions: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for ext in extensions {
        let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    normalized
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|known| known.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
