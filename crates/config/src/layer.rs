use std::collections::BTreeMap;
use std::fmt;
use std::path;

use crate::ConfigError;
use crate::Value;

type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// A resolved value and the layer it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    value: Value,
    origin: String,
}

impl Entry {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// A known setting that a layer supplied with the wrong shape, or a whole layer that
/// could not be parsed (`key` is `None`).
///
/// The dropped value never reaches the merge so the previous layer's value stands.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Malformed {
    pub layer: String,
    pub key: Option<String>,
    pub reason: String,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "`{key}` in `{}` was ignored: {}", self.layer, self.reason),
            None => write!(f, "`{}` was ignored: {}", self.layer, self.reason),
        }
    }
}

/// One source of settings, e.g. the base config or production overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    name: String,
    entries: BTreeMap<String, Entry>,
    malformed: Vec<Malformed>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a setting, checking it against the shape known keys require.
    pub fn with(mut self, key: &str, value: impl Into<serde_yaml::Value>) -> Self {
        self.insert(key, &value.into());
        self
    }

    fn insert(&mut self, key: &str, raw: &serde_yaml::Value) {
        match crate::value::coerce(key, raw) {
            Ok(value) => {
                let entry = Entry {
                    value,
                    origin: self.name.clone(),
                };
                self.entries.insert(key.to_owned(), entry);
            }
            Err(reason) => {
                let malformed = Malformed {
                    layer: self.name.clone(),
                    key: Some(key.to_owned()),
                    reason,
                };
                log::warn!("{malformed}");
                self.malformed.push(malformed);
            }
        }
    }

    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        let name = path.display().to_string();
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(name, &content),
            _ => Self::from_yaml_str(name, &content),
        }
    }

    /// Load a layer that overrides others, such as production settings.
    ///
    /// A file that doesn't parse, or isn't a mapping, becomes an empty layer recording the
    /// problem so the layers below it stay authoritative. Read failures are still errors.
    pub fn from_override_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Self::from_file(path).or_else(Self::dropped)
    }

    fn dropped(error: ConfigError) -> Result<Self> {
        let (name, reason) = match error {
            ConfigError::Parse { layer, source } => (layer, source.to_string()),
            ConfigError::InvalidLayer { layer, reason } => (layer, reason),
            error => return Err(error),
        };
        let malformed = Malformed {
            layer: name.clone(),
            key: None,
            reason,
        };
        log::warn!("{malformed}");
        let mut layer = Self::new(name);
        layer.malformed.push(malformed);
        Ok(layer)
    }

    pub fn from_yaml_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        if content.trim().is_empty() {
            return Ok(Self::new(name));
        }
        let raw = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            layer: name.clone(),
            source: Box::new(e),
        })?;
        Self::from_raw(name, raw)
    }

    pub fn from_toml_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        let raw = toml::from_str(content).map_err(|e| ConfigError::Parse {
            layer: name.clone(),
            source: Box::new(e),
        })?;
        Self::from_raw(name, raw)
    }

    fn from_raw(name: String, raw: serde_yaml::Value) -> Result<Self> {
        let mapping = match raw {
            serde_yaml::Value::Null => return Ok(Self::new(name)),
            serde_yaml::Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::InvalidLayer {
                    layer: name,
                    reason: "expected a mapping of setting names to values".to_owned(),
                });
            }
        };

        let mut layer = Self::new(name);
        for (key, value) in &mapping {
            let Some(key) = key.as_str() else {
                return Err(ConfigError::InvalidLayer {
                    layer: layer.name,
                    reason: format!("setting names must be strings, found `{key:?}`"),
                });
            };
            layer.insert(key, value);
        }
        log::trace!("{}: {} setting(s)", layer.name, layer.entries.len());
        Ok(layer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(Entry::value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn malformed(&self) -> &[Malformed] {
        &self.malformed
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.malformed.is_empty()
    }

    /// Shallow-merge `over` on top of `self`; `over` wins for keys both define.
    ///
    /// Entries keep the name of the layer that supplied them.
    pub fn merge(mut self, over: &Self) -> Self {
        self.entries
            .extend(over.entries.iter().map(|(k, e)| (k.clone(), e.clone())));
        self.malformed.extend(over.malformed.iter().cloned());
        self.name = if self.name.is_empty() {
            over.name.clone()
        } else {
            format!("{}+{}", self.name, over.name)
        };
        self
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, Entry>, Vec<Malformed>) {
        (self.entries, self.malformed)
    }
}

/// Walk up from `dir` looking for `name`.
pub fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    log::debug!("Using config file `{}`", file_path.display());
    Some(file_path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_file_yaml() {
        let layer = Layer::from_file("tests/fixtures/config/sitecfg.yml").unwrap();
        assert_eq!(layer.name(), "tests/fixtures/config/sitecfg.yml");
        assert_eq!(
            layer.get("SITENAME"),
            Some(&Value::Text("Store Half Byte-Reverse Indexed".to_owned()))
        );
        assert_eq!(layer.get("FEED_ALL_ATOM"), Some(&Value::Null));
        assert_eq!(layer.get("DEFAULT_PAGINATION"), Some(&Value::Integer(2)));
        assert!(layer.malformed().is_empty());
    }

    #[test]
    fn test_from_file_toml() {
        let layer = Layer::from_file("tests/fixtures/config/publishconf.toml").unwrap();
        assert_eq!(
            layer.get("SITEURL"),
            Some(&Value::Text("https://sthbrx.github.io".to_owned()))
        );
        assert!(matches!(layer.get("FEED_ALL_ATOM"), Some(Value::Pattern(_))));
        assert_eq!(layer.get("CATEGORY_FEED_ATOM"), Some(&Value::Null));
    }

    #[test]
    fn test_from_file_empty() {
        let layer = Layer::from_file("tests/fixtures/config/empty.yml").unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let result = Layer::from_file("tests/fixtures/config/invalid_syntax.yml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_from_override_file_invalid_syntax() {
        let layer = Layer::from_override_file("tests/fixtures/config/broken_override.yml").unwrap();
        assert_eq!(layer.name(), "tests/fixtures/config/broken_override.yml");
        assert_eq!(layer.get("SOCIAL"), None);
        assert_eq!(layer.malformed().len(), 1);
        assert_eq!(layer.malformed()[0].key, None);
        assert!(
            layer.malformed()[0]
                .to_string()
                .starts_with("`tests/fixtures/config/broken_override.yml` was ignored: ")
        );
    }

    #[test]
    fn test_dropped_not_a_mapping() {
        let result = Layer::from_yaml_str("list", "- SITENAME\n").or_else(Layer::dropped);
        let layer = result.unwrap();
        assert!(layer.entries().next().is_none());
        assert_eq!(layer.malformed()[0].layer, "list");
    }

    #[test]
    fn test_from_override_file_not_found() {
        let result = Layer::from_override_file("tests/fixtures/config/config_does_not_exist.yml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_from_override_file_well_formed() {
        let actual = Layer::from_override_file("tests/fixtures/config/publishconf.toml").unwrap();
        let expected = Layer::from_file("tests/fixtures/config/publishconf.toml").unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_from_file_not_found() {
        let result = Layer::from_file("tests/fixtures/config/config_does_not_exist.yml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_from_file_malformed_social() {
        let layer = Layer::from_file("tests/fixtures/config/malformed_social.yml").unwrap();
        assert_eq!(layer.get("SOCIAL"), None);
        assert_eq!(layer.malformed().len(), 1);
        assert_eq!(layer.malformed()[0].key.as_deref(), Some("SOCIAL"));
        assert_eq!(layer.get("SITENAME"), Some(&Value::Text("Patched".to_owned())));
    }

    #[test]
    fn test_from_yaml_not_a_mapping() {
        let result = Layer::from_yaml_str("list", "- SITENAME\n- PATH\n");
        assert!(matches!(result, Err(ConfigError::InvalidLayer { .. })));
    }

    #[test]
    fn test_from_yaml_non_string_key() {
        let result = Layer::from_yaml_str("numbers", "1: one\n");
        assert!(matches!(result, Err(ConfigError::InvalidLayer { .. })));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let layer = Layer::from_yaml_str("base", "DISQUS_SITENAME: sthbrx\n").unwrap();
        assert_eq!(
            layer.get("DISQUS_SITENAME"),
            Some(&Value::Opaque(serde_yaml::Value::from("sthbrx")))
        );
    }

    #[test]
    fn test_with_checks_shape() {
        let layer = Layer::new("code")
            .with("SITENAME", "X")
            .with("DEFAULT_PAGINATION", -1);
        assert!(layer.get("SITENAME").is_some());
        assert!(layer.get("DEFAULT_PAGINATION").is_none());
        assert_eq!(layer.malformed()[0].layer, "code");
    }

    #[test]
    fn test_merge_later_wins() {
        let base = Layer::new("base").with("SITENAME", "X").with("AUTHOR", "OzLabs");
        let over = Layer::new("over").with("SITENAME", "Y");
        let merged = base.merge(&over);
        assert_eq!(merged.get("SITENAME"), Some(&Value::Text("Y".to_owned())));
        assert_eq!(merged.get("AUTHOR"), Some(&Value::Text("OzLabs".to_owned())));
        let origins: Vec<_> = merged.entries().map(|(k, e)| (k, e.origin())).collect();
        assert_eq!(origins, [("AUTHOR", "base"), ("SITENAME", "over")]);
    }

    #[test]
    fn find_project_file_same_dir() {
        let actual = find_project_file("tests/fixtures/config", "sitecfg.yml").unwrap();
        let expected = path::Path::new("tests/fixtures/config/sitecfg.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_parent_dir() {
        let actual = find_project_file("tests/fixtures/config/child", "sitecfg.yml").unwrap();
        let expected = path::Path::new("tests/fixtures/config/sitecfg.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_doesnt_exist() {
        let expected = path::Path::new("<NOT FOUND>");
        let actual = find_project_file("tests/fixtures/", "sitecfg.yml")
            .unwrap_or_else(|| expected.into());
        assert_eq!(actual, expected);
    }
}
