//! Page path → question bank resource lookup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use quizdeck_core::error::LoadError;

/// Topics with their own page on the exam site.
const BUILTIN_TOPICS: &[&str] = &[
    "xarici-dil",
    "information-technologies",
    "it-esaslari",
    "az-dili",
];

/// One bank resource and the page paths that show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Bank resource, relative to the configured base or absolute.
    pub resource: String,
    /// Page paths mapped to this resource.
    pub paths: Vec<String>,
}

impl TopicEntry {
    /// The entry for a topic served at `/<topic>`, `/<topic>.html`, and
    /// `/SeidExam/<topic>.html`, backed by `./<topic>.json`.
    pub fn standard(topic: &str) -> Self {
        Self {
            resource: format!("./{topic}.json"),
            paths: vec![
                format!("/{topic}"),
                format!("/{topic}.html"),
                format!("/SeidExam/{topic}.html"),
            ],
        }
    }
}

/// Ordered lookup table; the first entry listing a path wins.
#[derive(Debug, Clone, Default)]
pub struct TopicTable {
    entries: Vec<TopicEntry>,
}

impl TopicTable {
    pub fn new(entries: Vec<TopicEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_TOPICS.iter().map(|t| TopicEntry::standard(t)).collect())
    }

    /// Append `others`, keeping existing entries ahead of them.
    pub fn extend(&mut self, others: impl IntoIterator<Item = TopicEntry>) {
        self.entries.extend(others);
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn resource_for(&self, page: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.paths.iter().any(|p| p == page))
            .map(|e| e.resource.as_str())
    }

    /// Resolve `page` to a fetchable location.
    pub fn locate(&self, page: &str, base: Option<&str>) -> Result<Location, LoadError> {
        let resource = self
            .resource_for(page)
            .ok_or_else(|| LoadError::UnknownPage(page.to_string()))?;
        Ok(Location::resolve(resource, base))
    }
}

/// Where a bank is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(String),
    Path(PathBuf),
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

impl Location {
    /// Interpret `s` as a URL if it has an http(s) scheme, else a path.
    pub fn parse(s: &str) -> Self {
        if is_url(s) {
            Location::Url(s.to_string())
        } else {
            Location::Path(PathBuf::from(s))
        }
    }

    /// Resolve `resource` against `base`, which is either a URL or a
    /// directory. Absolute resources ignore the base.
    pub fn resolve(resource: &str, base: Option<&str>) -> Self {
        if is_url(resource) {
            return Location::Url(resource.to_string());
        }
        let relative = resource.trim_start_matches("./");
        match base {
            Some(base) if is_url(base) => Location::Url(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                relative.trim_start_matches('/')
            )),
            Some(base) if !resource.starts_with('/') => {
                Location::Path(PathBuf::from(base).join(relative))
            }
            _ => Location::Path(PathBuf::from(resource)),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{url}"),
            Location::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_maps_all_aliases() {
        let table = TopicTable::builtin();
        for page in ["/az-dili", "/az-dili.html", "/SeidExam/az-dili.html"] {
            assert_eq!(table.resource_for(page), Some("./az-dili.json"));
        }
        assert_eq!(
            table.resource_for("/information-technologies"),
            Some("./information-technologies.json")
        );
        assert_eq!(table.resource_for("/az-dili/"), None);
    }

    #[test]
    fn unknown_page_is_an_error() {
        let err = TopicTable::builtin().locate("/history", None).unwrap_err();
        assert!(matches!(err, LoadError::UnknownPage(p) if p == "/history"));
    }

    #[test]
    fn earlier_entries_win() {
        let mut table = TopicTable::new(vec![TopicEntry {
            resource: "custom.json".into(),
            paths: vec!["/az-dili".into()],
        }]);
        table.extend(TopicTable::builtin().entries().to_vec());
        assert_eq!(table.resource_for("/az-dili"), Some("custom.json"));
        assert_eq!(table.resource_for("/az-dili.html"), Some("./az-dili.json"));
    }

    #[test]
    fn resolve_against_url_base() {
        let loc = Location::resolve("./it-esaslari.json", Some("https://example.org/SeidExam/"));
        assert_eq!(
            loc,
            Location::Url("https://example.org/SeidExam/it-esaslari.json".into())
        );
    }

    #[test]
    fn resolve_against_directory_base() {
        let loc = Location::resolve("./it-esaslari.json", Some("banks"));
        assert_eq!(loc, Location::Path(PathBuf::from("banks").join("it-esaslari.json")));

        let absolute = Location::resolve("/srv/q.json", Some("banks"));
        assert_eq!(absolute, Location::Path(PathBuf::from("/srv/q.json")));
    }

    #[test]
    fn absolute_url_resource_ignores_base() {
        let loc = Location::resolve("http://cdn.test/q.json", Some("banks"));
        assert_eq!(loc, Location::Url("http://cdn.test/q.json".into()));
        assert_eq!(Location::parse("q.json"), Location::Path(PathBuf::from("q.json")));
    }
}
