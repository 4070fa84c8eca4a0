/// Failure to walk the content directory.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("invalid `IGNORE_FILES` entry `{glob}`")]
    InvalidIgnore {
        glob: String,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to build the `IGNORE_FILES` matcher")]
    IgnoreSet {
        #[source]
        source: ignore::Error,
    },
}
