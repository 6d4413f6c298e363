//! Pure helpers for album paths and file names.
//!
//! Paths inside the core are `/`-separated and never carry the storage
//! root segment; [`strip_root_prefix`] and [`with_root_prefix`] convert at
//! the server boundary.

use unicode_normalization::UnicodeNormalization;

/// Storage segment that prefixes every path the server sends or expects.
pub const DEFAULT_ROOT_PREFIX: &str = "albums";

/// Extensions accepted as slideshow images (lowercase).
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "heif", "heic"];

/// Extensions the server can rotate losslessly.
pub const ROTATABLE_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Returns the lowercase extension of the last path segment.
///
/// Returns an empty string when the segment has no `.`.
pub fn extension_of(path: &str) -> String {
    let name = base_name(path);
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Returns `true` if the path names an allowed image type.
pub fn is_image(path: &str) -> bool {
    let ext = extension_of(path);
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Returns `true` if the path names a JPEG, the only type the server rotates.
pub fn is_rotatable(path: &str) -> bool {
    let ext = extension_of(path);
    ROTATABLE_EXTENSIONS.contains(&ext.as_str())
}

/// Returns the last `/`-separated segment of `path`.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns everything before the last `/`, or `""` for a top-level name.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Joins a folder path and a child name, treating `""` as the root.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Produces a filesystem-safe file name.
///
/// The name is NFKD-normalised and reduced to ASCII, path separators become
/// spaces, every run of characters outside `[A-Za-z0-9_.-]` collapses into a
/// single `_`, and leading or trailing `_`/`.` are trimmed. Windows device
/// names (`CON`, `LPT1`, ...) gain a leading `_`. The function is
/// idempotent.
///
/// # Examples
///
/// ```
/// use frameshow_core::fs::path::sanitize_name;
///
/// assert_eq!(sanitize_name("My Café photo!.jpg"), "My_Cafe_photo_.jpg");
/// assert_eq!(sanitize_name("con.txt"), "_con.txt");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let mut cleaned = String::with_capacity(ascii.len());
    let mut in_run = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            cleaned.push(ch);
            in_run = false;
        } else if !in_run {
            cleaned.push('_');
            in_run = true;
        }
    }

    let trimmed = cleaned.trim_matches(|c| c == '_' || c == '.');
    let stem = trimmed.split('.').next().unwrap_or_default();
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
    {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Sanitizes every `/`-separated segment of `path`, keeping the separators.
///
/// Traversal segments such as `..` sanitize to empty strings, so they can
/// never climb out of the album root.
pub fn secure_path(path: &str) -> String {
    path.split('/')
        .map(sanitize_name)
        .collect::<Vec<_>>()
        .join("/")
}

/// Removes a leading `root/` segment from `path` if present.
pub fn strip_root_prefix<'a>(path: &'a str, root: &str) -> &'a str {
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

/// Prepends the `root/` storage segment.
pub fn with_root_prefix(path: &str, root: &str) -> String {
    format!("{root}/{path}")
}

/// Returns the user-facing part of a stored file name.
///
/// Stored images are named `<id>.<name>.<ext>`; the id segment is dropped.
/// Names with fewer than two dots are returned unchanged.
pub fn display_name(name: &str) -> &str {
    if name.matches('.').count() < 2 {
        return name;
    }
    match name.find('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Splits a path into its non-empty segments.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
