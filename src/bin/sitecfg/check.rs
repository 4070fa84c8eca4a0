use crate::args;

/// Report settings that don't fit together
///
/// Problems are printed but never fail the command.
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {}

impl CheckArgs {
    pub(crate) fn run(&self, config: &args::ConfigArgs) -> anyhow::Result<()> {
        let config = config.load_config()?;
        let warnings = sitecfg_config::validate(&config.site);
        let style = anstyle::AnsiColor::Yellow.on_default().bold();
        for warning in &warnings {
            anstream::println!("{}warning{}: {warning}", style.render(), style.render_reset());
        }
        log::info!("{} warning(s)", warnings.len());
        Ok(())
    }
}
