use crate::args;

/// Print the resolved configuration
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct PrintConfigArgs {
    /// Show which layer supplied each setting instead of its value
    #[arg(long)]
    origin: bool,
}

impl PrintConfigArgs {
    pub(crate) fn run(&self, config: &args::ConfigArgs) -> anyhow::Result<()> {
        let config = config.load_config()?;
        if self.origin {
            for (key, entry) in config.site.entries() {
                anstream::println!("{key}: {}", entry.origin());
            }
        } else {
            anstream::print!("{}", config.site);
        }
        Ok(())
    }
}
