use std::process;

use clap::Parser;

use solharm::interfaces::cli::{configure_logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = configure_logging(cli.output.as_deref()) {
        eprintln!("Unable to configure logging: {err:#}");
        process::exit(1);
    }
    if run(&cli).is_err() {
        process::exit(1);
    }
}
