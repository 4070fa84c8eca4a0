use std::path::PathBuf;

use crate::args;

/// List the URL and output file of every content item
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct RoutesArgs {
    /// Site directory holding the content `PATH` [default: the base config's directory]
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

impl RoutesArgs {
    pub(crate) fn run(&self, config: &args::ConfigArgs) -> anyhow::Result<()> {
        let config = config.load_config()?;
        let root = self.root.as_deref().unwrap_or(config.root.as_path());
        let source = sitecfg_core::Source::from_config(root, &config.site)?;
        let plan = sitecfg_core::plan(&config.site, &source);

        for item in &plan.items {
            anstream::println!("{} -> {}", item.source.rel_path, item.route);
        }
        for collision in &plan.collisions {
            log::warn!("{collision}");
        }
        log::info!(
            "{} routed, {} skipped",
            plan.items.len(),
            plan.skipped.len()
        );
        Ok(())
    }
}
