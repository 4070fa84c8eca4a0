use std::fmt;

/// A setting with a fixed, known value shape.
///
/// Settings not listed here are carried through opaquely.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Key {
    Author,
    SiteName,
    SiteUrl,
    SiteSubtitle,
    Timezone,
    DefaultLang,
    Path,
    Theme,
    FeedAllAtom,
    FeedDomain,
    FeedRss,
    CategoryFeedAtom,
    TranslationFeedAtom,
    AuthorFeedAtom,
    AuthorFeedRss,
    Links,
    Social,
    ArticlePaths,
    PagePaths,
    ArticleUrl,
    ArticleSaveAs,
    PageUrl,
    PageSaveAs,
    AuthorsSaveAs,
    DefaultPagination,
    SummaryMaxLength,
    IgnoreFiles,
    SideblockTitle,
    SideblockContent,
    RelativeUrls,
}

impl Key {
    pub const ALL: &'static [Key] = &[
        Key::Author,
        Key::SiteName,
        Key::SiteUrl,
        Key::SiteSubtitle,
        Key::Timezone,
        Key::DefaultLang,
        Key::Path,
        Key::Theme,
        Key::FeedAllAtom,
        Key::FeedDomain,
        Key::FeedRss,
        Key::CategoryFeedAtom,
        Key::TranslationFeedAtom,
        Key::AuthorFeedAtom,
        Key::AuthorFeedRss,
        Key::Links,
        Key::Social,
        Key::ArticlePaths,
        Key::PagePaths,
        Key::ArticleUrl,
        Key::ArticleSaveAs,
        Key::PageUrl,
        Key::PageSaveAs,
        Key::AuthorsSaveAs,
        Key::DefaultPagination,
        Key::SummaryMaxLength,
        Key::IgnoreFiles,
        Key::SideblockTitle,
        Key::SideblockContent,
        Key::RelativeUrls,
    ];

    /// Feed outputs, in the order they are reported.
    pub const FEEDS: &'static [Key] = &[
        Key::FeedAllAtom,
        Key::FeedRss,
        Key::CategoryFeedAtom,
        Key::TranslationFeedAtom,
        Key::AuthorFeedAtom,
        Key::AuthorFeedRss,
    ];

    pub fn from_name(name: &str) -> Option<Key> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Key::Author => "AUTHOR",
            Key::SiteName => "SITENAME",
            Key::SiteUrl => "SITEURL",
            Key::SiteSubtitle => "SITESUBTITLE",
            Key::Timezone => "TIMEZONE",
            Key::DefaultLang => "DEFAULT_LANG",
            Key::Path => "PATH",
            Key::Theme => "THEME",
            Key::FeedAllAtom => "FEED_ALL_ATOM",
            Key::FeedDomain => "FEED_DOMAIN",
            Key::FeedRss => "FEED_RSS",
            Key::CategoryFeedAtom => "CATEGORY_FEED_ATOM",
            Key::TranslationFeedAtom => "TRANSLATION_FEED_ATOM",
            Key::AuthorFeedAtom => "AUTHOR_FEED_ATOM",
            Key::AuthorFeedRss => "AUTHOR_FEED_RSS",
            Key::Links => "LINKS",
            Key::Social => "SOCIAL",
            Key::ArticlePaths => "ARTICLE_PATHS",
            Key::PagePaths => "PAGE_PATHS",
            Key::ArticleUrl => "ARTICLE_URL",
            Key::ArticleSaveAs => "ARTICLE_SAVE_AS",
            Key::PageUrl => "PAGE_URL",
            Key::PageSaveAs => "PAGE_SAVE_AS",
            Key::AuthorsSaveAs => "AUTHORS_SAVE_AS",
            Key::DefaultPagination => "DEFAULT_PAGINATION",
            Key::SummaryMaxLength => "SUMMARY_MAX_LENGTH",
            Key::IgnoreFiles => "IGNORE_FILES",
            Key::SideblockTitle => "SIDEBLOCK_TITLE",
            Key::SideblockContent => "SIDEBLOCK_CONTENT",
            Key::RelativeUrls => "RELATIVE_URLS",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Key::Author
            | Key::SiteName
            | Key::SiteUrl
            | Key::Timezone
            | Key::DefaultLang
            | Key::Path
            | Key::Theme
            | Key::AuthorsSaveAs => Shape::Text,
            Key::SiteSubtitle | Key::FeedDomain | Key::SideblockTitle | Key::SideblockContent => {
                Shape::OptionalText
            }
            Key::FeedAllAtom
            | Key::FeedRss
            | Key::CategoryFeedAtom
            | Key::TranslationFeedAtom
            | Key::AuthorFeedAtom
            | Key::AuthorFeedRss => Shape::OptionalPattern,
            Key::ArticleUrl | Key::ArticleSaveAs | Key::PageUrl | Key::PageSaveAs => Shape::Pattern,
            Key::ArticlePaths | Key::PagePaths | Key::IgnoreFiles => Shape::TextList,
            Key::Links => Shape::Links,
            Key::Social => Shape::Social,
            Key::DefaultPagination => Shape::Pagination,
            Key::SummaryMaxLength => Shape::OptionalCount,
            Key::RelativeUrls => Shape::Flag,
        }
    }

    /// The placeholder a feed written once per category, author or language must carry.
    pub fn per_item_field(self) -> Option<crate::Field> {
        match self {
            Key::CategoryFeedAtom | Key::AuthorFeedAtom | Key::AuthorFeedRss => {
                Some(crate::Field::Slug)
            }
            Key::TranslationFeedAtom => Some(crate::Field::Lang),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a [`Key`] accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Text,
    /// `null` (or `false`) switches the feature off
    OptionalText,
    Pattern,
    /// `null` (or `false`) switches the feed off
    OptionalPattern,
    TextList,
    /// `[label, url]` pairs
    Links,
    /// `[label, url]` pairs or `[label, url, url]` triples
    Social,
    /// A positive page size, or `null`/`false` to disable
    Pagination,
    OptionalCount,
    Flag,
}

impl Shape {
    pub fn describe(self) -> &'static str {
        match self {
            Shape::Text => "a string",
            Shape::OptionalText => "a string or null",
            Shape::Pattern => "a path pattern",
            Shape::OptionalPattern => "a path pattern or null",
            Shape::TextList => "a list of strings",
            Shape::Links => "a list of [label, url] pairs",
            Shape::Social => "a list of [label, url] pairs or [label, url, url] triples",
            Shape::Pagination => "a positive integer or false",
            Shape::OptionalCount => "a non-negative integer or null",
            Shape::Flag => "a boolean",
        }
    }
}
