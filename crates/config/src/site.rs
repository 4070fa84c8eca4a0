use std::collections::BTreeMap;
use std::fmt;

use crate::Entry;
use crate::Feeds;
use crate::Key;
use crate::Link;
use crate::Malformed;
use crate::Pagination;
use crate::PathPattern;
use crate::Value;

/// The merged, read-only settings for one build.
///
/// Built by [`ConfigResolver::load`][crate::ConfigResolver::load].
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    entries: BTreeMap<String, Entry>,
    malformed: Vec<Malformed>,
}

impl SiteConfig {
    pub(crate) fn new(entries: BTreeMap<String, Entry>, malformed: Vec<Malformed>) -> Self {
        Self { entries, malformed }
    }

    /// Look up any setting, including ones this crate doesn't know.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(Entry::value)
    }

    /// Name of the layer that supplied `key`.
    pub fn origin(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(Entry::origin)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Values that were dropped while merging, in layer order.
    pub fn malformed(&self) -> &[Malformed] {
        &self.malformed
    }

    pub(crate) fn value(&self, key: Key) -> Option<&Value> {
        self.get(key.as_str())
    }

    fn text(&self, key: Key) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    fn list(&self, key: Key) -> Option<&[String]> {
        match self.value(key) {
            Some(Value::List(items)) => Some(items),
            _ => None,
        }
    }

    fn links_of(&self, key: Key) -> &[Link] {
        match self.value(key) {
            Some(Value::Links(links)) => links.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn pattern(&self, key: Key) -> Option<&PathPattern> {
        match self.value(key) {
            Some(Value::Pattern(pattern)) => Some(pattern),
            _ => None,
        }
    }

    fn count(&self, key: Key) -> Option<u64> {
        match self.value(key) {
            Some(Value::Integer(n)) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn site_name(&self) -> &str {
        self.text(Key::SiteName).unwrap_or_default()
    }

    /// Content directory, relative to the site root.
    pub fn content_path(&self) -> &str {
        self.text(Key::Path).unwrap_or_default()
    }

    /// Base URL of the published site; empty for relative-only builds.
    pub fn site_url(&self) -> &str {
        self.text(Key::SiteUrl).unwrap_or_default()
    }

    pub fn author(&self) -> Option<&str> {
        self.text(Key::Author)
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.text(Key::SiteSubtitle)
    }

    pub fn timezone(&self) -> Option<&str> {
        self.text(Key::Timezone)
    }

    pub fn default_lang(&self) -> Option<&str> {
        self.text(Key::DefaultLang)
    }

    pub fn theme(&self) -> Option<&str> {
        self.text(Key::Theme)
    }

    pub fn article_paths(&self) -> Option<&[String]> {
        self.list(Key::ArticlePaths)
    }

    pub fn page_paths(&self) -> Option<&[String]> {
        self.list(Key::PagePaths)
    }

    pub fn ignore_files(&self) -> &[String] {
        self.list(Key::IgnoreFiles).unwrap_or_default()
    }

    pub fn article_url(&self) -> Option<&PathPattern> {
        self.pattern(Key::ArticleUrl)
    }

    pub fn article_save_as(&self) -> Option<&PathPattern> {
        self.pattern(Key::ArticleSaveAs)
    }

    pub fn page_url(&self) -> Option<&PathPattern> {
        self.pattern(Key::PageUrl)
    }

    pub fn page_save_as(&self) -> Option<&PathPattern> {
        self.pattern(Key::PageSaveAs)
    }

    pub fn authors_save_as(&self) -> Option<&str> {
        self.text(Key::AuthorsSaveAs)
    }

    pub fn summary_max_length(&self) -> Option<u64> {
        self.count(Key::SummaryMaxLength)
    }

    pub fn relative_urls(&self) -> bool {
        matches!(self.value(Key::RelativeUrls), Some(Value::Bool(true)))
    }

    /// Blogroll, in display order.
    pub fn links(&self) -> &[Link] {
        self.links_of(Key::Links)
    }

    /// Social links, in display order.
    pub fn social(&self) -> &[Link] {
        self.links_of(Key::Social)
    }

    /// Sidebar title and body, when both are set.
    pub fn sideblock(&self) -> Option<(&str, &str)> {
        let title = self.text(Key::SideblockTitle)?;
        let content = self.text(Key::SideblockContent)?;
        Some((title, content))
    }

    pub fn feeds(&self) -> Feeds<'_> {
        Feeds::new(self)
    }

    pub fn pagination(&self) -> Pagination {
        let per_page = self
            .count(Key::DefaultPagination)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(std::num::NonZeroUsize::new);
        Pagination::new(per_page)
    }
}

impl serde::Serialize for SiteConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, e)| (k, e.value())))
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        let converted = converted.strip_prefix("---\n").unwrap_or(&converted);
        write!(f, "{converted}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ConfigResolver;
    use crate::Layer;

    fn load(layer: Layer) -> SiteConfig {
        ConfigResolver::new().load([&layer]).unwrap()
    }

    fn base() -> Layer {
        Layer::new("base")
            .with("SITENAME", "Store Half Byte-Reverse Indexed")
            .with("PATH", "content")
    }

    #[test]
    fn accessors_read_typed_values() {
        let config = load(
            base()
                .with("AUTHOR", "OzLabs")
                .with("SITEURL", "")
                .with("SUMMARY_MAX_LENGTH", 80)
                .with("RELATIVE_URLS", true),
        );
        assert_eq!(config.site_name(), "Store Half Byte-Reverse Indexed");
        assert_eq!(config.content_path(), "content");
        assert_eq!(config.author(), Some("OzLabs"));
        assert_eq!(config.site_url(), "");
        assert_eq!(config.subtitle(), None);
        assert_eq!(config.summary_max_length(), Some(80));
        assert!(config.relative_urls());
        assert!(config.ignore_files().is_empty());
        assert!(config.links().is_empty());
    }

    #[test]
    fn sideblock_needs_both_halves() {
        let config = load(base().with("SIDEBLOCK_TITLE", "Disclaimer"));
        assert_eq!(config.sideblock(), None);

        let config = load(
            base()
                .with("SIDEBLOCK_TITLE", "Disclaimer")
                .with("SIDEBLOCK_CONTENT", "Opinions are our own."),
        );
        assert_eq!(config.sideblock(), Some(("Disclaimer", "Opinions are our own.")));
    }

    #[test]
    fn origin_tracks_supplying_layer() {
        let over = Layer::new("publishconf").with("SITEURL", "https://sthbrx.github.io");
        let config = ConfigResolver::new().load([&base(), &over]).unwrap();
        assert_eq!(config.origin("SITENAME"), Some("base"));
        assert_eq!(config.origin("SITEURL"), Some("publishconf"));
        assert_eq!(config.origin("THEME"), None);
    }

    #[test]
    fn display_as_yaml() {
        let config = load(base().with("FEED_ALL_ATOM", serde_yaml::Value::Null));
        let actual = config.to_string();
        assert_eq!(
            actual,
            "FEED_ALL_ATOM: null\nPATH: content\nSITENAME: Store Half Byte-Reverse Indexed\n"
        );
    }
}
