#![allow(unexpected_cfgs)]

mod commands;
mod error;
mod texel_dump;
mod util;

use argh::FromArgs;
use core::error::Error;
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[derive(FromArgs, Debug)]
/// Convert and resize texel dump files
struct TopLevel {
    /// log every reformat and file handler call to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Convert(commands::convert::ConvertCmd),
    Info(commands::info::InfoCmd),
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();
    SimpleLogger::new().with_level(log_level(cli.verbose)).init()?;

    match cli.command {
        Commands::Convert(cmd) => {
            commands::convert::handle_convert_command(cmd)?;
        }
        Commands::Info(cmd) => {
            commands::info::handle_info_command(cmd)?;
        }
    }

    Ok(())
}

/// Warnings only, unless `--verbose` asks for reformat and handler tracing.
fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
