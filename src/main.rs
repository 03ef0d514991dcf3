use clap::Parser;
use inputremapd::cli::Cli;
use inputremapd::config::Config;
use inputremapd::error::ExitCode;
use inputremapd::{daemon, logging};

fn main() {
    let cli = Cli::parse();
    let level = logging::level_from_flags(cli.quiet, cli.verbose);
    logging::init(level, cli.log);

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("inputremapd: {e}");
            std::process::exit(e.exit_code() as i32);
        }
    };

    if let Err(e) = daemon::run(config) {
        log::error!("{e}");
        std::process::exit(e.exit_code() as i32);
    }
    std::process::exit(ExitCode::Success as i32);
}
