use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use relative_path::RelativePath;
use relative_path::RelativePathBuf;

use crate::PlaceholderError;

/// The item metadata a pattern may draw on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Slug,
    Category,
    Lang,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Slug => "slug",
            Field::Category => "category",
            Field::Lang => "lang",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `strftime`-style directive allowed inside `{date:...}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePart {
    /// `%Y`
    Year,
    /// `%y`
    ShortYear,
    /// `%m`
    Month,
    /// `%d`
    Day,
    /// `%b`
    MonthAbbr,
    /// `%B`
    MonthName,
}

impl DatePart {
    fn from_directive(c: char) -> Option<Self> {
        match c {
            'Y' => Some(DatePart::Year),
            'y' => Some(DatePart::ShortYear),
            'm' => Some(DatePart::Month),
            'd' => Some(DatePart::Day),
            'b' => Some(DatePart::MonthAbbr),
            'B' => Some(DatePart::MonthName),
            _ => None,
        }
    }

    fn directive(self) -> char {
        match self {
            DatePart::Year => 'Y',
            DatePart::ShortYear => 'y',
            DatePart::Month => 'm',
            DatePart::Day => 'd',
            DatePart::MonthAbbr => 'b',
            DatePart::MonthName => 'B',
        }
    }

    fn field(self) -> Field {
        match self {
            DatePart::Year | DatePart::ShortYear => Field::Year,
            DatePart::Month | DatePart::MonthAbbr | DatePart::MonthName => Field::Month,
            DatePart::Day => Field::Day,
        }
    }

    fn render(self, date: time::Date) -> String {
        match self {
            DatePart::Year => format!("{:04}", date.year()),
            DatePart::ShortYear => format!("{:02}", date.year().rem_euclid(100)),
            DatePart::Month => format!("{:02}", u8::from(date.month())),
            DatePart::Day => format!("{:02}", date.day()),
            DatePart::MonthAbbr => date.month().to_string().chars().take(3).collect(),
            DatePart::MonthName => date.month().to_string(),
        }
    }
}

/// One element of a `{date:...}` format.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateToken {
    Part(DatePart),
    Literal(char),
}

/// A named substitution point, e.g. `{slug}` or `{date:%Y}`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Slug,
    Category,
    Lang,
    Date(Vec<DateToken>),
}

impl Placeholder {
    fn parse(inner: &str) -> Option<Self> {
        match inner {
            "slug" => Some(Placeholder::Slug),
            "category" => Some(Placeholder::Category),
            "lang" => Some(Placeholder::Lang),
            _ => {
                let format = inner.strip_prefix("date:")?;
                let mut tokens = Vec::new();
                let mut chars = format.chars();
                while let Some(c) = chars.next() {
                    if c == '%' {
                        let part = chars.next().and_then(DatePart::from_directive)?;
                        tokens.push(DateToken::Part(part));
                    } else {
                        tokens.push(DateToken::Literal(c));
                    }
                }
                let has_part = tokens.iter().any(|t| matches!(t, DateToken::Part(_)));
                has_part.then_some(Placeholder::Date(tokens))
            }
        }
    }

    /// Context field this placeholder reads.
    fn context_field(&self) -> &'static str {
        match self {
            Placeholder::Slug => "slug",
            Placeholder::Category => "category",
            Placeholder::Lang => "lang",
            Placeholder::Date(_) => "date",
        }
    }

    fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        let fixed = match self {
            Placeholder::Slug => Some(Field::Slug),
            Placeholder::Category => Some(Field::Category),
            Placeholder::Lang => Some(Field::Lang),
            Placeholder::Date(_) => None,
        };
        let dated = match self {
            Placeholder::Date(tokens) => tokens.as_slice(),
            _ => &[],
        };
        fixed.into_iter().chain(dated.iter().filter_map(|t| match t {
            DateToken::Part(p) => Some(p.field()),
            DateToken::Literal(_) => None,
        }))
    }

    fn render(&self, context: &ItemContext) -> Option<String> {
        match self {
            Placeholder::Slug => context.slug.clone(),
            Placeholder::Category => context.category.clone(),
            Placeholder::Lang => context.lang.clone(),
            Placeholder::Date(tokens) => {
                let date = context.date?;
                let rendered = tokens
                    .iter()
                    .map(|t| match t {
                        DateToken::Part(p) => p.render(date),
                        DateToken::Literal(c) => c.to_string(),
                    })
                    .collect();
                Some(rendered)
            }
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Date(tokens) => {
                write!(f, "date:")?;
                for token in tokens {
                    match token {
                        DateToken::Part(p) => write!(f, "%{}", p.directive())?,
                        DateToken::Literal(c) => write!(f, "{c}")?,
                    }
                }
                Ok(())
            }
            other => f.write_str(other.context_field()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Constant(String),
    Placeholder(Placeholder),
}

/// A URL or save-path template such as `blog/{date:%Y}/{slug}/`.
///
/// `{{` and `}}` produce literal braces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    parts: Vec<Part>,
}

impl PathPattern {
    pub fn parse<S: AsRef<str>>(pattern: S) -> Result<Self, PlaceholderError> {
        Self::parse_str(pattern.as_ref())
    }

    fn parse_str(pattern: &str) -> Result<Self, PlaceholderError> {
        let mut parts = Vec::new();
        let mut constant = String::new();
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    constant.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    constant.push('}');
                }
                '{' => {
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(PlaceholderError::Unterminated {
                                    pattern: pattern.to_owned(),
                                });
                            }
                            Some(c) => inner.push(c),
                        }
                    }
                    let placeholder =
                        Placeholder::parse(&inner).ok_or_else(|| PlaceholderError::Unknown {
                            pattern: pattern.to_owned(),
                            placeholder: inner.clone(),
                        })?;
                    if !constant.is_empty() {
                        parts.push(Part::Constant(std::mem::take(&mut constant)));
                    }
                    parts.push(Part::Placeholder(placeholder));
                }
                c => constant.push(c),
            }
        }
        if !constant.is_empty() {
            parts.push(Part::Constant(constant));
        }

        Ok(Self {
            source: pattern.to_owned(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.parts.iter().filter_map(|p| match p {
            Part::Placeholder(p) => Some(p),
            Part::Constant(_) => None,
        })
    }

    /// The item fields this pattern depends on.
    pub fn fields(&self) -> BTreeSet<Field> {
        self.placeholders().flat_map(|p| p.fields()).collect()
    }

    /// Substitute every placeholder from `context`.
    ///
    /// Backslashes become `/`, doubled slashes left by blank substitutions collapse, and a
    /// leading `/` is dropped.
    pub fn resolve(&self, context: &ItemContext) -> Result<String, PlaceholderError> {
        let mut resolved = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Constant(constant) => resolved.push_str(constant),
                Part::Placeholder(placeholder) => {
                    let value = placeholder.render(context).ok_or_else(|| {
                        PlaceholderError::Missing {
                            pattern: self.source.clone(),
                            placeholder: placeholder.to_string(),
                            field: placeholder.context_field(),
                        }
                    })?;
                    resolved.push_str(&value);
                }
            }
        }

        let mut resolved = resolved.replace('\\', "/");
        while resolved.contains("//") {
            resolved = resolved.replace("//", "/");
        }
        if resolved.starts_with('/') {
            resolved.remove(0);
        }

        Ok(resolved)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl serde::Serialize for PathPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Metadata of one content item, supplying placeholder values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemContext {
    pub date: Option<time::Date>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub lang: Option<String>,
}

impl ItemContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date and slug as implied by a source file name like `2017-03-04-kvm-notes.md`.
    pub fn from_file_name(name: &str) -> Self {
        let mut split_name = crate::path::split_ext(name);
        while split_name.1.is_some() {
            split_name = crate::path::split_ext(split_name.0);
        }
        let (date, stem) = crate::path::parse_file_stem(split_name.0);
        let slug = crate::path::slugify(stem);
        Self {
            date,
            slug: (!slug.is_empty()).then_some(slug),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: time::Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl fmt::Display for ItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("date", self.date.map(|d| d.to_string())),
            ("slug", self.slug.clone()),
            ("category", self.category.clone()),
            ("lang", self.lang.clone()),
        ];
        let present = fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .join(", ");
        write!(f, "{{{present}}}")
    }
}

/// Where a URL is written on disk; extension-less URLs become `<url>/index.html`.
pub fn save_path_for_url<S: AsRef<str>>(url: S) -> RelativePathBuf {
    save_path_for_url_str(url.as_ref())
}

fn save_path_for_url_str(url: &str) -> RelativePathBuf {
    let url = url.trim_start_matches('/');
    let dir = url.trim_end_matches('/');
    if !url.ends_with('/') && RelativePath::new(url).extension().is_some() {
        RelativePathBuf::from(url)
    } else if dir.is_empty() {
        RelativePathBuf::from("index.html")
    } else {
        RelativePathBuf::from(format!("{dir}/index.html"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: time::Month, d: u8) -> time::Date {
        time::Date::from_calendar_date(y, m, d).unwrap()
    }

    #[test]
    fn resolve_dated_article() {
        let pattern = PathPattern::parse("blog/{date:%Y}/{date:%m}/{date:%d}/{slug}/").unwrap();
        let context = ItemContext::new()
            .with_date(date(2017, time::Month::March, 4))
            .with_slug("kvm-notes");
        let actual = pattern.resolve(&context).unwrap();
        assert_eq!(actual, "blog/2017/03/04/kvm-notes/");
    }

    #[test]
    fn resolve_missing_placeholder() {
        let pattern = PathPattern::parse("pages/{slug}/").unwrap();
        let actual = pattern.resolve(&ItemContext::new());
        assert_eq!(
            actual,
            Err(PlaceholderError::Missing {
                pattern: "pages/{slug}/".to_owned(),
                placeholder: "slug".to_owned(),
                field: "slug",
            })
        );
    }

    #[test]
    fn resolve_missing_date() {
        let pattern = PathPattern::parse("{date:%Y}/{slug}.html").unwrap();
        let context = ItemContext::new().with_slug("x");
        let err = pattern.resolve(&context).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`{date:%Y}/{slug}.html` references `{date:%Y}` but the item has no date"
        );
    }

    #[test]
    fn resolve_combined_date_format() {
        let pattern = PathPattern::parse("{date:%Y-%m}/{date:%b}/{date:%B}/{date:%y}").unwrap();
        let context = ItemContext::new().with_date(date(2009, time::Month::September, 30));
        assert_eq!(
            pattern.resolve(&context).unwrap(),
            "2009-09/Sep/September/09"
        );
    }

    #[test]
    fn resolve_strips_leading_slash() {
        let pattern = PathPattern::parse("/abs/{slug}").unwrap();
        let context = ItemContext::new().with_slug("path");
        assert_eq!(pattern.resolve(&context).unwrap(), "abs/path");
    }

    #[test]
    fn resolve_collapses_blank_substitution() {
        let pattern = PathPattern::parse("blog/{category}/{slug}.html").unwrap();
        let context = ItemContext::new().with_slug("post").with_category("");
        assert_eq!(pattern.resolve(&context).unwrap(), "blog/post.html");
    }

    #[test]
    fn resolve_windows_separators() {
        let pattern = PathPattern::parse("pages\\{slug}.html").unwrap();
        let context = ItemContext::new().with_slug("about");
        assert_eq!(pattern.resolve(&context).unwrap(), "pages/about.html");
    }

    #[test]
    fn parse_escaped_braces() {
        let pattern = PathPattern::parse("{{raw}}/{slug}").unwrap();
        let context = ItemContext::new().with_slug("x");
        assert_eq!(pattern.resolve(&context).unwrap(), "{raw}/x");
    }

    #[test]
    fn parse_unknown_placeholder() {
        let actual = PathPattern::parse("{title}.html");
        assert_eq!(
            actual,
            Err(PlaceholderError::Unknown {
                pattern: "{title}.html".to_owned(),
                placeholder: "title".to_owned(),
            })
        );
    }

    #[test]
    fn parse_unknown_date_directive() {
        assert!(PathPattern::parse("{date:%H}").is_err());
        assert!(PathPattern::parse("{date:}").is_err());
        assert!(PathPattern::parse("{date}").is_err());
    }

    #[test]
    fn parse_unterminated() {
        let actual = PathPattern::parse("blog/{slug");
        assert_eq!(
            actual,
            Err(PlaceholderError::Unterminated {
                pattern: "blog/{slug".to_owned(),
            })
        );
    }

    #[test]
    fn fields_of_dated_pattern() {
        let pattern = PathPattern::parse("{date:%Y}/{date:%b}/{slug}.html").unwrap();
        let expected: BTreeSet<_> = [Field::Year, Field::Month, Field::Slug].into();
        assert_eq!(pattern.fields(), expected);
    }

    #[test]
    fn placeholder_display_round_trips() {
        let pattern = PathPattern::parse("{date:%Y-%m}/{category}").unwrap();
        let shown: Vec<_> = pattern.placeholders().map(|p| p.to_string()).collect();
        assert_eq!(shown, ["date:%Y-%m", "category"]);
    }

    #[test]
    fn context_from_dated_file_name() {
        let actual = ItemContext::from_file_name("2017-03-04-KVM Notes.md");
        assert_eq!(actual.date, Some(date(2017, time::Month::March, 4)));
        assert_eq!(actual.slug.as_deref(), Some("kvm-notes"));
    }

    #[test]
    fn context_from_plain_file_name() {
        let actual = ItemContext::from_file_name("about.en.rst");
        assert_eq!(actual.date, None);
        assert_eq!(actual.slug.as_deref(), Some("about"));
    }

    #[test]
    fn context_display() {
        let context = ItemContext::new().with_slug("a").with_lang("en");
        assert_eq!(context.to_string(), "{slug=a, lang=en}");
    }

    #[test]
    fn save_path_explodes_directory_url() {
        let actual = save_path_for_url("blog/2017/03/04/kvm-notes/");
        assert_eq!(actual, RelativePathBuf::from("blog/2017/03/04/kvm-notes/index.html"));
    }

    #[test]
    fn save_path_keeps_extension() {
        let actual = save_path_for_url("/hello/world.html");
        assert_eq!(actual, RelativePathBuf::from("hello/world.html"));
    }

    #[test]
    fn save_path_no_extension() {
        let actual = save_path_for_url("/hello/world");
        assert_eq!(actual, RelativePathBuf::from("hello/world/index.html"));
    }

    #[test]
    fn save_path_root() {
        assert_eq!(save_path_for_url("/"), RelativePathBuf::from("index.html"));
    }
}
