use std::path::PathBuf;

/// Failure to produce a [`SiteConfig`][crate::SiteConfig].
///
/// These abort the build before anything is rendered.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("missing required setting(s): {}", .keys.join(", "))]
    MissingRequired { keys: Vec<&'static str> },
    #[error("failed to read config `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config `{layer}`")]
    Parse {
        layer: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid config `{layer}`: {reason}")]
    InvalidLayer { layer: String, reason: String },
}

/// Failure to parse or fill in a [`PathPattern`][crate::PathPattern].
///
/// Only the item being resolved is affected; callers may skip it and carry on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PlaceholderError {
    #[error("`{pattern}` references `{{{placeholder}}}` but the item has no {field}")]
    Missing {
        pattern: String,
        placeholder: String,
        field: &'static str,
    },
    #[error("unknown placeholder `{{{placeholder}}}` in `{pattern}`")]
    Unknown {
        pattern: String,
        placeholder: String,
    },
    #[error("unterminated placeholder in `{pattern}`")]
    Unterminated { pattern: String },
}
