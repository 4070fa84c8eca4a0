use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context as _;
use sitecfg_config::ConfigResolver;
use sitecfg_config::Layer;
use sitecfg_config::SiteConfig;

const CONFIG_FILE: &str = "sitecfg.yml";

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config layer, lowest precedence first [default: sitecfg.yml in the current directory or a parent]
    #[arg(short, long = "config", value_name = "FILE", global = true)]
    pub(crate) config: Vec<PathBuf>,

    /// Settings that rank below every config layer
    #[arg(long, value_name = "FILE", global = true)]
    pub(crate) defaults: Option<PathBuf>,
}

/// A resolved config and the directory its paths are relative to.
#[derive(Clone, Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) root: PathBuf,
    pub(crate) site: SiteConfig,
}

impl ConfigArgs {
    fn layer_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        if !self.config.is_empty() {
            return Ok(self.config.clone());
        }
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let path = sitecfg_config::find_project_file(&cwd, CONFIG_FILE).with_context(|| {
            format!("No {CONFIG_FILE} found in `{}` or its parents", cwd.display())
        })?;
        Ok(vec![path])
    }

    pub(crate) fn load_config(&self) -> anyhow::Result<LoadedConfig> {
        let paths = self.layer_paths()?;
        // Only the base layer has to parse; a broken override is reported by `check`.
        let layers = paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                if i == 0 {
                    Layer::from_file(path)
                } else {
                    Layer::from_override_file(path)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut resolver = ConfigResolver::new();
        if let Some(defaults) = &self.defaults {
            resolver = resolver.with_defaults(Layer::from_file(defaults)?);
        }
        let site = resolver.load(&layers)?;

        let root = site_root(&paths[0]);
        log::debug!("Site root `{}`", root.display());
        Ok(LoadedConfig { root, site })
    }
}

/// The directory holding the base config layer.
fn site_root(base: &Path) -> PathBuf {
    match base.parent() {
        Some(parent) if parent != Path::new("") => parent.to_owned(),
        _ => PathBuf::from("."),
    }
}

pub(crate) fn init_logging(level: Option<log::Level>, colored: bool) {
    let Some(level) = level else {
        return;
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level.to_level_filter());
    builder.format(move |f, record| {
        let style = if colored {
            level_style(record.level())
        } else {
            anstyle::Style::new()
        };
        writeln!(
            f,
            "{}[{}]{} {}",
            style.render(),
            record.level().as_str().to_lowercase(),
            style.render_reset(),
            record.args()
        )
    });
    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug | log::Level::Trace => anstyle::Style::new().dimmed(),
    }
}
