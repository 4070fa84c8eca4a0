use std::fmt;

use itertools::Itertools;

use crate::Field;
use crate::Key;
use crate::Malformed;
use crate::SiteConfig;

/// A problem with a resolved config that doesn't stop the build.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Warning {
    /// A layer value was dropped for having the wrong shape.
    Malformed(Malformed),
    /// A URL pattern and its save-as pattern draw on different item fields.
    PatternMismatch {
        url_key: Key,
        save_key: Key,
        url_only: Vec<Field>,
        save_only: Vec<Field>,
    },
    DuplicateFeedPath {
        first: Key,
        second: Key,
        path: String,
    },
    /// A per-category, per-author or per-language feed would write every item to one file.
    FeedMissingPlaceholder { key: Key, field: Field },
    FeedWithoutDomain,
    /// `FEED_DOMAIN` is set while every feed is switched off.
    FeedDomainWithoutFeeds,
    IncompleteSideblock { missing: Key },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Malformed(malformed) => write!(f, "{malformed}"),
            Warning::PatternMismatch {
                url_key,
                save_key,
                url_only,
                save_only,
            } => {
                write!(f, "`{url_key}` and `{save_key}` use different placeholders")?;
                if !url_only.is_empty() {
                    write!(f, "; only `{url_key}` uses {}", url_only.iter().join(", "))?;
                }
                if !save_only.is_empty() {
                    write!(f, "; only `{save_key}` uses {}", save_only.iter().join(", "))?;
                }
                Ok(())
            }
            Warning::DuplicateFeedPath {
                first,
                second,
                path,
            } => write!(f, "`{first}` and `{second}` both write `{path}`"),
            Warning::FeedMissingPlaceholder { key, field } => {
                write!(f, "`{key}` has no {{{field}}} so every feed shares one file")
            }
            Warning::FeedWithoutDomain => write!(
                f,
                "feeds are enabled but neither `FEED_DOMAIN` nor `SITEURL` is set"
            ),
            Warning::FeedDomainWithoutFeeds => {
                write!(f, "`FEED_DOMAIN` is set but every feed is disabled")
            }
            Warning::IncompleteSideblock { missing } => {
                write!(f, "sideblock is ignored because `{missing}` is not set")
            }
        }
    }
}

const PATTERN_PAIRS: &[(Key, Key)] = &[
    (Key::ArticleUrl, Key::ArticleSaveAs),
    (Key::PageUrl, Key::PageSaveAs),
];

/// Check a resolved config for settings that are individually valid but don't fit together.
///
/// Warnings are returned in a stable order.
pub fn validate(config: &SiteConfig) -> Vec<Warning> {
    let mut warnings: Vec<_> = config
        .malformed()
        .iter()
        .cloned()
        .map(Warning::Malformed)
        .collect();
    check_patterns(config, &mut warnings);
    check_feeds(config, &mut warnings);
    check_sideblock(config, &mut warnings);
    warnings
}

fn check_patterns(config: &SiteConfig, warnings: &mut Vec<Warning>) {
    for (url_key, save_key) in PATTERN_PAIRS {
        let (Some(url), Some(save_as)) = (config.pattern(*url_key), config.pattern(*save_key))
        else {
            continue;
        };
        let url_fields = url.fields();
        let save_fields = save_as.fields();
        if url_fields != save_fields {
            warnings.push(Warning::PatternMismatch {
                url_key: *url_key,
                save_key: *save_key,
                url_only: url_fields.difference(&save_fields).copied().collect(),
                save_only: save_fields.difference(&url_fields).copied().collect(),
            });
        }
    }
}

fn check_feeds(config: &SiteConfig, warnings: &mut Vec<Warning>) {
    let feeds = config.feeds();
    let enabled: Vec<_> = feeds.enabled().collect();

    for ((first, a), (second, b)) in enabled.iter().tuple_combinations() {
        let path = a.as_str().trim_start_matches('/');
        if path == b.as_str().trim_start_matches('/') {
            warnings.push(Warning::DuplicateFeedPath {
                first: *first,
                second: *second,
                path: path.to_owned(),
            });
        }
    }

    for (key, pattern) in &enabled {
        let Some(field) = key.per_item_field() else {
            continue;
        };
        if !pattern.fields().contains(&field) {
            warnings.push(Warning::FeedMissingPlaceholder { key: *key, field });
        }
    }

    if enabled.is_empty() {
        let feed_domain = config.value(Key::FeedDomain).and_then(crate::Value::as_str);
        if feed_domain.is_some_and(|domain| !domain.is_empty()) {
            warnings.push(Warning::FeedDomainWithoutFeeds);
        }
    } else if feeds.domain().is_none() {
        warnings.push(Warning::FeedWithoutDomain);
    }
}

fn check_sideblock(config: &SiteConfig, warnings: &mut Vec<Warning>) {
    let set = |key: Key| config.value(key).is_some_and(|v| !v.is_null());
    let missing = match (set(Key::SideblockTitle), set(Key::SideblockContent)) {
        (true, false) => Key::SideblockContent,
        (false, true) => Key::SideblockTitle,
        _ => return,
    };
    warnings.push(Warning::IncompleteSideblock { missing });
}
