use sitecfg_config::SiteConfig;

use crate::CoreError;
use crate::SourcePath;

/// The content directory, minus anything `IGNORE_FILES` excludes.
#[derive(Debug, Clone)]
pub struct Source {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self, CoreError> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore
                .add_line(None, line)
                .map_err(|e| CoreError::InvalidIgnore {
                    glob: line.to_owned(),
                    source: e,
                })?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| CoreError::IgnoreSet { source: e })?;

        let source = Self {
            root: root.to_owned(),
            ignore,
        };
        Ok(source)
    }

    /// The content directory `PATH` under `site_root`, with `IGNORE_FILES` applied.
    pub fn from_config(site_root: &std::path::Path, config: &SiteConfig) -> Result<Self, CoreError> {
        let root = site_root.join(config.content_path());
        log::debug!("Content directory `{}`", root.display());
        Self::new(&root, config.ignore_files().iter().map(String::as_str))
    }

    /// Every included file, sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = SourcePath> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    log::warn!("Skipping unreadable content: {err}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(move |e| SourcePath::from_root(&self.root, e.path()))
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        let file = entry.path();

        // Parents were already checked on the way down.
        let is_dir = entry.file_type().is_dir();
        self.includes_path(file, is_dir)
    }
}
