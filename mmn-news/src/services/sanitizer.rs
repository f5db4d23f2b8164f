//! Folder-name sanitizer
//!
//! Maps a free-text title onto the character set that survives as a folder
//! name, so remote titles and local folders compare byte for byte.

/// Characters other than ASCII letters and digits that are kept as-is
const EXTRA_ALLOWED: [char; 5] = ['-', '_', '(', ')', ' '];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || EXTRA_ALLOWED.contains(&c)
}

/// Replace every disallowed character with `replacement`
///
/// Output has the same number of characters, in the same order, as `text`.
pub fn sanitize(text: &str, replacement: char) -> String {
    text.chars()
        .map(|c| if is_allowed(c) { c } else { replacement })
        .collect()
}
