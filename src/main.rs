use std::process::ExitCode;

use canvasfe::{cli, logger};
use clap::Parser;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    logger::init(args.verbose, args.log_file.as_deref());
    cli::run(args)
}
