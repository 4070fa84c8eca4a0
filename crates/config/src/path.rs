static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a slug for a title or file stem, as used by `{slug}`
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}


pub fn split_ext(name: &str) -> (&str, Option<&str>) {
    name.rsplit_once('.')
        .map(|(n, e)| (n, Some(e)))
        .unwrap_or((name, None))
}

static DATE_PREFIX_REF: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})[- ](.*)$").unwrap()
});

/// Split a `YYYY-MM-DD-rest` file stem into its date and the rest.
///
/// Stems without a valid leading date are returned whole.
pub fn parse_file_stem(stem: &str) -> (Option<time::Date>, &str) {
    let parts = DATE_PREFIX_REF.captures(stem).and_then(|caps| {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u8 = caps.get(2)?.as_str().parse().ok()?;
        let day: u8 = caps.get(3)?.as_str().parse().ok()?;
        let month = time::Month::try_from(month).ok()?;
        let published = time::Date::from_calendar_date(year, month, day).ok()?;
        Some((Some(published), caps.get(4)?.as_str()))
    });

    parts.unwrap_or((None, stem))
}

#[cfg(test)]
mod test_stem {
    use super::*;

    fn date(year: i32, month: time::Month, day: u8) -> Option<time::Date> {
        Some(time::Date::from_calendar_date(year, month, day).unwrap())
    }

    #[test]
    fn split_ext_multiple() {
        assert_eq!(split_ext("about.en.rst"), ("about.en", Some("rst")));
        assert_eq!(split_ext("README"), ("README", None));
    }

    #[test]
    fn parse_file_stem_empty() {
        assert_eq!(parse_file_stem(""), (None, ""));
    }

    #[test]
    fn parse_file_stem_none() {
        assert_eq!(
            parse_file_stem("First Blog Post"),
            (None, "First Blog Post")
        );
    }

    #[test]
    fn parse_file_stem_out_of_range_month() {
        assert_eq!(
            parse_file_stem("2017-30-5 First Blog Post"),
            (None, "2017-30-5 First Blog Post")
        );
    }

    #[test]
    fn parse_file_stem_out_of_range_day() {
        assert_eq!(
            parse_file_stem("2017-3-50 First Blog Post"),
            (None, "2017-3-50 First Blog Post")
        );
    }

    #[test]
    fn parse_file_stem_single_digit() {
        assert_eq!(
            parse_file_stem("2017-3-5 First Blog Post"),
            (date(2017, time::Month::March, 5), "First Blog Post")
        );
    }

    #[test]
    fn parse_file_stem_leading_zero() {
        assert_eq!(
            parse_file_stem("2017-03-04-kvm-notes"),
            (date(2017, time::Month::March, 4), "kvm-notes")
        );
    }

    #[test]
    fn parse_file_stem_leap_day() {
        assert_eq!(parse_file_stem("2017-02-29-nope"), (None, "2017-02-29-nope"));
        assert_eq!(
            parse_file_stem("2016-02-29-yes"),
            (date(2016, time::Month::February, 29), "yes")
        );
    }
}
