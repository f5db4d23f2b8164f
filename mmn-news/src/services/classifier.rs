//! Reconciliation classifier
//!
//! Per release group, in order:
//! 1. raw title listed in the exclusion set -> excluded
//! 2. sanitized title is a substring of any sanitized local folder -> found
//! 3. otherwise -> not found
//!
//! Substring containment lets decorated folders ("2015 - Title (Deluxe)")
//! match, at the cost of false positives for very short or generic titles.

use crate::models::{Classification, ReleaseGroup};
use std::collections::BTreeSet;

/// Partition `release_groups` into found / not-found / excluded
pub fn classify(
    release_groups: &[ReleaseGroup],
    local_folders: &BTreeSet<String>,
    excludes: &BTreeSet<String>,
) -> Classification {
    let mut classification = Classification::default();

    for release in release_groups {
        if excludes.contains(release.title()) {
            classification.excluded.push(release.clone());
        } else if is_present_locally(release, local_folders) {
            classification.found.push(release.clone());
        } else {
            classification.not_found.push(release.clone());
        }
    }

    classification
}

fn is_present_locally(release: &ReleaseGroup, local_folders: &BTreeSet<String>) -> bool {
    local_folders
        .iter()
        .any(|folder| folder.contains(release.sanitized_title()))
}
