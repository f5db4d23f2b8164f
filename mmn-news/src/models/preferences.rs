//! Per-artist persisted preferences

use std::collections::BTreeSet;

/// Skip flag and exclusion list for one artist
///
/// A missing document is equivalent to `Preferences::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Exclude the artist from remote processing entirely
    pub skip: bool,
    /// Release titles to ignore; exact, case-sensitive match on the raw title
    pub excludes: BTreeSet<String>,
}
