use std::fmt;

use relative_path::RelativePath;
use relative_path::RelativePathBuf;
use sitecfg_config::ItemContext;
use sitecfg_config::PathPattern;
use sitecfg_config::PlaceholderError;
use sitecfg_config::SiteConfig;

/// File extensions the rendering engine reads as documents; everything else is static.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "rst", "html", "htm"];

const DEFAULT_PAGE_PATH: &str = "pages";

static DEFAULT_ARTICLE_URL: once_cell::sync::Lazy<PathPattern> =
    once_cell::sync::Lazy::new(|| PathPattern::parse("{slug}.html").unwrap());
static DEFAULT_PAGE_URL: once_cell::sync::Lazy<PathPattern> =
    once_cell::sync::Lazy::new(|| PathPattern::parse("pages/{slug}.html").unwrap());

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentKind {
    Article,
    Page,
}

impl ContentKind {
    /// Decide what `rel_path`, relative to the content directory, holds.
    ///
    /// `None` for static files and for documents outside every content path.
    pub fn classify(config: &SiteConfig, rel_path: &RelativePath) -> Option<Self> {
        if !is_document(rel_path) {
            return None;
        }
        if page_root(config, rel_path).is_some() {
            Some(ContentKind::Page)
        } else if article_root(config, rel_path).is_some() {
            Some(ContentKind::Article)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Page => "page",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_document(rel_path: &RelativePath) -> bool {
    rel_path
        .extension()
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn normalize_root(root: &str) -> RelativePathBuf {
    RelativePath::new(root.trim_matches('/')).normalize()
}

fn find_root(roots: &[RelativePathBuf], rel_path: &RelativePath) -> Option<RelativePathBuf> {
    roots
        .iter()
        .filter(|root| rel_path.starts_with(root))
        .max_by_key(|root| root.components().count())
        .cloned()
}

fn page_root(config: &SiteConfig, rel_path: &RelativePath) -> Option<RelativePathBuf> {
    let roots: Vec<_> = match config.page_paths() {
        Some(paths) => paths.iter().map(|p| normalize_root(p)).collect(),
        None => vec![normalize_root(DEFAULT_PAGE_PATH)],
    };
    find_root(&roots, rel_path)
}

fn article_root(config: &SiteConfig, rel_path: &RelativePath) -> Option<RelativePathBuf> {
    let roots: Vec<_> = match config.article_paths() {
        Some(paths) => paths.iter().map(|p| normalize_root(p)).collect(),
        None => vec![RelativePathBuf::new()],
    };
    find_root(&roots, rel_path)
}

/// Placeholder values for a content file.
///
/// Date and slug come from the file name, the category from the directory holding the
/// file below its article path, and the language from `DEFAULT_LANG`.
pub fn item_context(config: &SiteConfig, kind: ContentKind, rel_path: &RelativePath) -> ItemContext {
    let mut context = rel_path
        .file_name()
        .map(ItemContext::from_file_name)
        .unwrap_or_default();

    if kind == ContentKind::Article {
        let category = article_root(config, rel_path)
            .and_then(|root| {
                let parent = rel_path.parent()?;
                let below = parent.strip_prefix(&root).ok()?;
                below.file_name().map(sitecfg_config::path::slugify)
            })
            .filter(|category| !category.is_empty());
        context.category = category;
    }
    context.lang = config.default_lang().map(str::to_owned);
    context
}

/// Where an item is linked from and where it is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub url: String,
    pub save_as: RelativePathBuf,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.save_as)
    }
}

/// Resolve the URL and output path of one item.
///
/// Without a `*_SAVE_AS` pattern the output path follows the URL.
pub fn route(
    config: &SiteConfig,
    kind: ContentKind,
    context: &ItemContext,
) -> Result<Route, PlaceholderError> {
    let (url, save_as) = match kind {
        ContentKind::Article => (config.article_url(), config.article_save_as()),
        ContentKind::Page => (config.page_url(), config.page_save_as()),
    };
    let default_url = match kind {
        ContentKind::Article => &*DEFAULT_ARTICLE_URL,
        ContentKind::Page => &*DEFAULT_PAGE_URL,
    };

    let url = url.unwrap_or(default_url).resolve(context)?;
    let save_as = match save_as {
        Some(save_as) => RelativePathBuf::from(save_as.resolve(context)?),
        None => sitecfg_config::save_path_for_url(&url),
    };
    Ok(Route { url, save_as })
}
