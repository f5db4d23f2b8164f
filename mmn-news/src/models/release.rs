//! Remote release group records

use crate::services::sanitizer::sanitize;
use std::fmt;
use std::str::FromStr;

/// Release category as reported by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseCategory {
    Album,
    Live,
    Compilation,
    /// Any other remote-reported type string, kept verbatim
    Other(String),
}

impl ReleaseCategory {
    /// Map a remote type string onto a category
    pub fn from_remote(value: &str) -> Self {
        match value {
            "Album" => ReleaseCategory::Album,
            "Live" => ReleaseCategory::Live,
            "Compilation" => ReleaseCategory::Compilation,
            other => ReleaseCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseCategory::Album => "Album",
            ReleaseCategory::Live => "Live",
            ReleaseCategory::Compilation => "Compilation",
            ReleaseCategory::Other(value) => value,
        }
    }

    pub fn is_album(&self) -> bool {
        matches!(self, ReleaseCategory::Album)
    }
}

impl fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release type requested from the remote catalog
///
/// Exactly one filter is sent per request; the variants are not combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseTypeFilter {
    /// Standard albums (`all` on the command line)
    #[default]
    All,
    /// Live albums
    Live,
    /// Compilations
    Comp,
}

impl ReleaseTypeFilter {
    /// Value of the remote `type` query parameter
    pub fn remote_type(&self) -> &'static str {
        match self {
            ReleaseTypeFilter::All => "album",
            ReleaseTypeFilter::Live => "live",
            ReleaseTypeFilter::Comp => "compilation",
        }
    }
}

impl FromStr for ReleaseTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ReleaseTypeFilter::All),
            "live" => Ok(ReleaseTypeFilter::Live),
            "comp" => Ok(ReleaseTypeFilter::Comp),
            other => Err(format!(
                "unknown release category '{}' (expected all, live or comp)",
                other
            )),
        }
    }
}

impl fmt::Display for ReleaseTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseTypeFilter::All => "all",
            ReleaseTypeFilter::Live => "live",
            ReleaseTypeFilter::Comp => "comp",
        };
        f.write_str(name)
    }
}

/// A remote release group, normalized
///
/// Immutable once built. `sanitized_title` is always `sanitize(title)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseGroup {
    title: String,
    release_date: Option<String>,
    category: ReleaseCategory,
    remote_id: String,
    sanitized_title: String,
}

impl ReleaseGroup {
    /// Build a release group; an empty `release_date` is treated as unknown
    pub fn new(
        title: impl Into<String>,
        release_date: Option<String>,
        category: ReleaseCategory,
        remote_id: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let sanitized_title = sanitize(&title, '_');
        Self {
            title,
            release_date: release_date.filter(|d| !d.trim().is_empty()),
            category,
            remote_id: remote_id.into(),
            sanitized_title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// First release date: year, year-month or full date
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn category(&self) -> &ReleaseCategory {
        &self.category
    }

    pub fn remote_id(&self) -> &str {
        &self.remote_id
    }

    pub fn sanitized_title(&self) -> &str {
        &self.sanitized_title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_title_derived_on_creation() {
        let rg = ReleaseGroup::new("AC/DC: Live!", None, ReleaseCategory::Live, "id-1");
        assert_eq!(rg.sanitized_title(), "AC_DC_ Live_");
        assert_eq!(rg.title(), "AC/DC: Live!");
    }

    #[test]
    fn test_empty_release_date_is_absent() {
        let rg = ReleaseGroup::new("X", Some(String::new()), ReleaseCategory::Album, "id");
        assert_eq!(rg.release_date(), None);

        let rg = ReleaseGroup::new("X", Some("1999-03".into()), ReleaseCategory::Album, "id");
        assert_eq!(rg.release_date(), Some("1999-03"));
    }

    #[test]
    fn test_category_from_remote() {
        assert_eq!(ReleaseCategory::from_remote("Album"), ReleaseCategory::Album);
        assert_eq!(ReleaseCategory::from_remote("Live"), ReleaseCategory::Live);
        assert_eq!(
            ReleaseCategory::from_remote("Compilation"),
            ReleaseCategory::Compilation
        );
        assert_eq!(
            ReleaseCategory::from_remote("EP"),
            ReleaseCategory::Other("EP".to_string())
        );
        assert_eq!(ReleaseCategory::Other("EP".into()).as_str(), "EP");
    }

    #[test]
    fn test_type_filter_parsing() {
        assert_eq!("all".parse::<ReleaseTypeFilter>(), Ok(ReleaseTypeFilter::All));
        assert_eq!("LIVE".parse::<ReleaseTypeFilter>(), Ok(ReleaseTypeFilter::Live));
        assert_eq!("comp".parse::<ReleaseTypeFilter>(), Ok(ReleaseTypeFilter::Comp));
        assert!("bootleg".parse::<ReleaseTypeFilter>().is_err());

        assert_eq!(ReleaseTypeFilter::All.remote_type(), "album");
        assert_eq!(ReleaseTypeFilter::Live.remote_type(), "live");
        assert_eq!(ReleaseTypeFilter::Comp.remote_type(), "compilation");
    }
}
