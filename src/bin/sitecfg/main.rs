mod args;
mod check;
mod config;
mod routes;
mod url;

use clap::Parser as _;
use proc_exit::prelude::*;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    // clap exits with `Failure` on bad usage; report `USAGE_ERR` instead.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return proc_exit::sysexits::USAGE_ERR.ok();
        }
        Err(e) => {
            let _ = e.print();
            return proc_exit::Code::SUCCESS.ok();
        }
    };

    cli.color.write_global();
    let colored_stderr = anstream::AutoStream::choice(&std::io::stderr()) != anstream::ColorChoice::Never;
    args::init_logging(cli.verbose.log_level(), colored_stderr);

    cli.command
        .run(&cli.config)
        .map_err(|e| format!("{e:#}"))
        .with_code(proc_exit::Code::FAILURE)?;

    Ok(())
}

/// Resolve and check the layered configuration of a static blog build
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "sitecfg", version, about)]
struct Cli {
    #[command(flatten, next_help_heading = "CONFIG")]
    config: args::ConfigArgs,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Config(config::PrintConfigArgs),
    Check(check::CheckArgs),
    Url(url::UrlArgs),
    Routes(routes::RoutesArgs),
}

impl Command {
    fn run(&self, config: &args::ConfigArgs) -> anyhow::Result<()> {
        match self {
            Command::Config(cmd) => cmd.run(config),
            Command::Check(cmd) => cmd.run(config),
            Command::Url(cmd) => cmd.run(config),
            Command::Routes(cmd) => cmd.run(config),
        }
    }
}

#[test]
fn verify_app() {
    use clap::CommandFactory as _;
    Cli::command().debug_assert();
}
