use linhist::check::{self, LogSink};
use linhist::cli::{self, Command};

use log::debug;
use std::process::ExitCode;
use structopt::StructOpt;

fn main() -> ExitCode {
    let opts = cli::Opts::from_args();

    // Info is the default floor so the verdict always shows up
    if let Err(err) = stderrlog::new()
        .module(module_path!())
        .quiet(opts.quiet)
        .verbosity(opts.verbose + 2)
        .init()
    {
        eprintln!("Unable to initialise logging: {}", err);
    }
    debug!("Parsed options: {:?}", opts);

    let result = match opts.cmd {
        Command::CheckMerge(ref args) => check::check_linearity(
            &opts.git, &args.repository, &args.source, &args.target, &LogSink,
        ),
    };
    debug!("Check finished with {:?}", result);

    // Errors were already reported by the check, only the exit code is left
    ExitCode::from(check::exit_code(&result))
}
