use crate::Key;
use crate::PathPattern;
use crate::SiteConfig;

/// Which Atom/RSS outputs the build writes, and where.
#[derive(Copy, Clone, Debug)]
pub struct Feeds<'c> {
    config: &'c SiteConfig,
}

impl<'c> Feeds<'c> {
    pub(crate) fn new(config: &'c SiteConfig) -> Self {
        Self { config }
    }

    /// Output pattern of `key`, or `None` when that feed is switched off.
    pub fn get(&self, key: Key) -> Option<&'c PathPattern> {
        if Key::FEEDS.contains(&key) {
            self.config.pattern(key)
        } else {
            None
        }
    }

    pub fn is_enabled(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Enabled feeds in reporting order.
    pub fn enabled(&self) -> impl Iterator<Item = (Key, &'c PathPattern)> + 'c {
        let config = self.config;
        Key::FEEDS
            .iter()
            .filter_map(move |key| config.pattern(*key).map(|pattern| (*key, pattern)))
    }

    /// Host that absolute feed links point at.
    ///
    /// `FEED_DOMAIN` when set, otherwise a non-empty `SITEURL`.
    pub fn domain(&self) -> Option<&'c str> {
        self.config
            .value(Key::FeedDomain)
            .and_then(crate::Value::as_str)
            .filter(|domain| !domain.is_empty())
            .or_else(|| Some(self.config.site_url()).filter(|url| !url.is_empty()))
    }

    /// Join the feed domain and a resolved feed path.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        let domain = self.domain()?;
        Some(format!(
            "{}/{}",
            domain.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ConfigResolver;
    use crate::Layer;

    fn base() -> Layer {
        Layer::new("base")
            .with("SITENAME", "Store Half Byte-Reverse Indexed")
            .with("PATH", "content")
    }

    #[test]
    fn enabled_skips_disabled_feeds() {
        let layer = base()
            .with("FEED_ALL_ATOM", "feeds/all.atom.xml")
            .with("FEED_RSS", serde_yaml::Value::Null)
            .with("CATEGORY_FEED_ATOM", "feeds/{slug}.atom.xml");
        let config = ConfigResolver::new().load([&layer]).unwrap();
        let feeds = config.feeds();
        let keys: Vec<_> = feeds.enabled().map(|(key, _)| key).collect();
        assert_eq!(keys, [Key::FeedAllAtom, Key::CategoryFeedAtom]);
        assert!(!feeds.is_enabled(Key::FeedRss));
        assert_eq!(feeds.get(Key::ArticleUrl), None);
    }

    #[test]
    fn production_layer_turns_feeds_on() {
        let over = Layer::new("publishconf").with("FEED_ALL_ATOM", "feeds/all.atom.xml");
        let base = base().with("FEED_ALL_ATOM", serde_yaml::Value::Null);
        let config = ConfigResolver::new().load([&base, &over]).unwrap();
        assert!(config.feeds().is_enabled(Key::FeedAllAtom));
    }

    #[test]
    fn domain_falls_back_to_site_url() {
        let layer = base().with("SITEURL", "https://sthbrx.github.io/");
        let config = ConfigResolver::new().load([&layer]).unwrap();
        let feeds = config.feeds();
        assert_eq!(feeds.domain(), Some("https://sthbrx.github.io/"));
        assert_eq!(
            feeds.absolute_url("/feeds/all.atom.xml").as_deref(),
            Some("https://sthbrx.github.io/feeds/all.atom.xml")
        );
    }

    #[test]
    fn domain_prefers_feed_domain() {
        let layer = base()
            .with("SITEURL", "https://sthbrx.github.io")
            .with("FEED_DOMAIN", "https://feeds.example.org");
        let config = ConfigResolver::new().load([&layer]).unwrap();
        assert_eq!(config.feeds().domain(), Some("https://feeds.example.org"));
    }

    #[test]
    fn domain_skips_empty_feed_domain() {
        let layer = base()
            .with("SITEURL", "https://sthbrx.github.io")
            .with("FEED_DOMAIN", "");
        let config = ConfigResolver::new().load([&layer]).unwrap();
        assert_eq!(config.feeds().domain(), Some("https://sthbrx.github.io"));
    }

    #[test]
    fn domain_empty_site_url() {
        let layer = base().with("SITEURL", "");
        let config = ConfigResolver::new().load([&layer]).unwrap();
        assert_eq!(config.feeds().domain(), None);
        assert_eq!(config.feeds().absolute_url("feeds/all.atom.xml"), None);
    }
}
