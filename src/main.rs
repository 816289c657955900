use breville::cli::{self, CliArgs};
use breville::logger;
use clap::Parser;

fn main() -> std::process::ExitCode {
    let args = CliArgs::parse();

    // Initialize run log (overwrites previous run's log file)
    logger::init(args.verbose, args.log_file.as_deref());

    cli::run(args)
}
