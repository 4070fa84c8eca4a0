use crate::ConfigError;
use crate::Key;
use crate::Layer;
use crate::SiteConfig;
use crate::Value;

const REQUIRED: &[Key] = &[Key::SiteName, Key::Path];

/// Folds layers into a [`SiteConfig`].
///
/// The resolver has no built-in defaults; an engine that has them passes them in with
/// [`ConfigResolver::with_defaults`] and they rank below every loaded layer.
#[derive(Clone, Debug, Default)]
pub struct ConfigResolver {
    defaults: Option<Layer>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: Layer) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn defaults(&self) -> Option<&Layer> {
        self.defaults.as_ref()
    }

    /// Merge `layers`, lowest precedence first.
    ///
    /// Fails when `SITENAME` or `PATH` is still unset afterwards.
    pub fn load<'l, I>(&self, layers: I) -> Result<SiteConfig, ConfigError>
    where
        I: IntoIterator<Item = &'l Layer>,
    {
        let start = self.defaults.clone().unwrap_or_default();
        let merged = layers
            .into_iter()
            .fold(start, |merged, layer| merged.merge(layer));

        let missing: Vec<_> = REQUIRED
            .iter()
            .filter(|key| !matches!(merged.get(key.as_str()), Some(Value::Text(_))))
            .map(|key| key.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired { keys: missing });
        }

        log::debug!("Resolved config from `{}`", merged.name());
        let (entries, malformed) = merged.into_parts();
        Ok(SiteConfig::new(entries, malformed))
    }
}
