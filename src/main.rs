use clap::Parser;
use portaldesk::cli::{init_tracing, run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
