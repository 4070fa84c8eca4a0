use anyhow::Context as _;
use sitecfg_config::ItemContext;
use sitecfg_config::Key;
use sitecfg_config::PathPattern;
use sitecfg_config::Value;

use crate::args;

/// Resolve a path pattern for one item
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct UrlArgs {
    /// A pattern like `blog/{date:%Y}/{slug}/`, or the name of a configured one like `ARTICLE_URL`
    pattern: String,

    #[arg(long)]
    slug: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    lang: Option<String>,

    /// Publication date, `YYYY-MM-DD`
    #[arg(long, value_parser = parse_date)]
    date: Option<time::Date>,
}

impl UrlArgs {
    pub(crate) fn run(&self, config: &args::ConfigArgs) -> anyhow::Result<()> {
        let pattern = match Key::from_name(&self.pattern) {
            Some(key) => {
                let config = config.load_config()?;
                match config.site.get(key.as_str()) {
                    Some(Value::Pattern(pattern)) => pattern.clone(),
                    _ => anyhow::bail!("`{key}` is not set to a path pattern"),
                }
            }
            None => PathPattern::parse(&self.pattern)?,
        };

        let context = ItemContext {
            date: self.date,
            slug: self.slug.clone(),
            category: self.category.clone(),
            lang: self.lang.clone(),
        };
        let resolved = pattern
            .resolve(&context)
            .with_context(|| format!("Failed to resolve for item {context}"))?;
        anstream::println!("{resolved}");
        Ok(())
    }
}

fn parse_date(value: &str) -> Result<time::Date, String> {
    let invalid = || format!("`{value}` is not a YYYY-MM-DD date");
    let mut parts = value.splitn(3, '-');
    let mut next = || parts.next().ok_or_else(invalid);
    let year: i32 = next()?.parse().map_err(|_| invalid())?;
    let month: u8 = next()?.parse().map_err(|_| invalid())?;
    let day: u8 = next()?.parse().map_err(|_| invalid())?;
    let month = time::Month::try_from(month).map_err(|_| invalid())?;
    time::Date::from_calendar_date(year, month, day).map_err(|e| format!("{}: {e}", invalid()))
}
