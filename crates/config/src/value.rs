use crate::{Key, PathPattern, Shape};

/// A resolved setting.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Value {
    /// Explicitly disabled
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Links(LinkList),
    Pattern(PathPattern),
    /// A setting this crate doesn't know, handed to the engine untouched
    Opaque(serde_yaml::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A `(label, url)` entry, with an optional second URL for social links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
    pub alt_url: Option<String>,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            alt_url: None,
        }
    }

    pub fn with_alt_url(mut self, alt_url: impl Into<String>) -> Self {
        self.alt_url = Some(alt_url.into());
        self
    }
}

impl serde::Serialize for Link {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq as _;

        let len = if self.alt_url.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.label)?;
        seq.serialize_element(&self.url)?;
        if let Some(alt_url) = &self.alt_url {
            seq.serialize_element(alt_url)?;
        }
        seq.end()
    }
}

/// Links in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct LinkList(Vec<Link>);

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Link> for LinkList {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'l> IntoIterator for &'l LinkList {
    type Item = &'l Link;
    type IntoIter = std::slice::Iter<'l, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check `raw` against the shape `name` requires.
///
/// Unknown names are passed through as [`Value::Opaque`].
pub(crate) fn coerce(name: &str, raw: &serde_yaml::Value) -> Result<Value, String> {
    let Some(key) = Key::from_name(name) else {
        return Ok(Value::Opaque(raw.clone()));
    };
    let shape = key.shape();
    let mismatch = || format!("expected {}", shape.describe());
    use serde_yaml::Value as Raw;
    match (shape, raw) {
        (Shape::Text | Shape::OptionalText, Raw::String(s)) => Ok(Value::Text(s.clone())),
        // A null string clears the value from lower layers.
        (Shape::Text | Shape::OptionalText | Shape::OptionalPattern | Shape::OptionalCount, Raw::Null)
        | (Shape::OptionalText | Shape::OptionalPattern | Shape::Pagination, Raw::Bool(false))
        | (Shape::Pagination, Raw::Null) => Ok(Value::Null),
        (Shape::Pattern | Shape::OptionalPattern, Raw::String(s)) => PathPattern::parse(s)
            .map(Value::Pattern)
            .map_err(|e| e.to_string()),
        (Shape::TextList, Raw::Sequence(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .map(Value::List)
            .ok_or_else(mismatch),
        (Shape::Links | Shape::Social, Raw::Sequence(items)) => {
            let allow_alt = shape == Shape::Social;
            items
                .iter()
                .map(|item| link(item, allow_alt))
                .collect::<Option<LinkList>>()
                .map(Value::Links)
                .ok_or_else(mismatch)
        }
        (Shape::Pagination, Raw::Number(n)) => n
            .as_i64()
            .filter(|n| *n > 0)
            .map(Value::Integer)
            .ok_or_else(mismatch),
        (Shape::OptionalCount, Raw::Number(n)) => n
            .as_i64()
            .filter(|n| *n >= 0)
            .map(Value::Integer)
            .ok_or_else(mismatch),
        (Shape::Flag, Raw::Bool(b)) => Ok(Value::Bool(*b)),
        _ => Err(mismatch()),
    }
}

fn link(item: &serde_yaml::Value, allow_alt: bool) -> Option<Link> {
    let fields = item.as_sequence()?;
    let fields = fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Option<Vec<_>>>()?;
    match fields.as_slice() {
        [label, url] => Some(Link::new(*label, *url)),
        [label, url, alt_url] if allow_alt => Some(Link::new(*label, *url).with_alt_url(*alt_url)),
        _ => None,
    }
}
