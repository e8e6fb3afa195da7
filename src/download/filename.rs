//! Path-component sanitization and destination mapping for items.
//!
//! Each item lands at `<root>/<owner>/<work>/<item>.mp3`. Owner, work, and
//! item titles come straight from page data, so every component is
//! sanitized before it touches the filesystem.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::entry::DownloadableItem;
use crate::site::ASSET_EXTENSION;

/// Maximum length of one path component in bytes.
const MAX_COMPONENT_BYTES: usize = 255;

/// Placeholder used when sanitization leaves nothing behind.
const EMPTY_COMPONENT_PLACEHOLDER: &str = "_";

const WINDOWS_RESERVED_NAMES: &[&str] = &["con", "prn", "aux", "nul"];

/// Strips characters that are unsafe in a single path component.
///
/// Removes `/ ? < > \ : * | "` and control characters, blanks names made of
/// dots only and Windows device names (`con`, `com1.txt`, ...), drops
/// trailing dots and spaces, then truncates to 255 bytes on a char boundary.
/// The result may be empty.
#[must_use]
pub fn sanitize_component(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| {
            !matches!(c, '/' | '?' | '<' | '>' | '\\' | ':' | '*' | '|' | '"') && !c.is_control()
        })
        .collect();

    if stripped.chars().all(|c| c == '.') || is_windows_reserved(&stripped) {
        return String::new();
    }

    let trimmed = stripped.trim_end_matches(['.', ' ']);
    truncate_to_bytes(trimmed, MAX_COMPONENT_BYTES).to_string()
}

/// Sanitizes a component, substituting `_` when nothing remains.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized = sanitize_component(name);
    if sanitized.is_empty() || !is_safe_filename_segment(&sanitized) {
        warn!(original = %name, "name is empty after sanitization; using placeholder");
        return EMPTY_COMPONENT_PLACEHOLDER.to_string();
    }
    sanitized
}

fn is_windows_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or_default().to_ascii_lowercase();
    if WINDOWS_RESERVED_NAMES.contains(&stem.as_str()) {
        return true;
    }
    ["com", "lpt"].iter().any(|prefix| {
        stem.strip_prefix(prefix)
            .is_some_and(|rest| rest.len() == 1 && rest.chars().all(|c| c.is_ascii_digit()))
    })
}

fn truncate_to_bytes(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

fn is_safe_filename_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

/// Where one item is written. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// `<root>/<owner>/<work>`.
    pub directory: PathBuf,
    /// `<item>.<extension>`.
    pub file_name: String,
}

impl Destination {
    /// Maps an item to its destination under `root`.
    #[must_use]
    pub fn for_item(root: &Path, item: &DownloadableItem) -> Self {
        let directory = root
            .join(sanitize_filename(&item.owner_name))
            .join(sanitize_filename(&item.work_title));
        let file_name = format!("{}.{ASSET_EXTENSION}", sanitize_filename(&item.item_title));
        Self {
            directory,
            file_name,
        }
    }

    /// Full path of the destination file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
