//! Command-line interface of the `solharm` binary.

use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use clap::Parser;
use log::{self, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::harmonics::parse_max_degree;
use crate::interfaces::input::Input;
use crate::interfaces::InputHandle;
use crate::io::format::{solharm_error, solharm_output};
use crate::io::{read_solharm_yaml, write_solharm_yaml};

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted heading to the `solharm-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    solharm_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    solharm_output!("│                                                                                                     │");
    solharm_output!("│   ███████  ██████  ██      ██   ██  █████  ██████  ███    ███                                       │");
    solharm_output!("│   ██      ██    ██ ██      ██   ██ ██   ██ ██   ██ ████  ████      S  (x, y, z)                     │");
    solharm_output!("│   ███████ ██    ██ ██      ███████ ███████ ██████  ██ ████ ██       lm                              │");
    solharm_output!("│        ██ ██    ██ ██      ██   ██ ██   ██ ██   ██ ██  ██  ██                                       │");
    solharm_output!("│   ███████  ██████  ███████ ██   ██ ██   ██ ██   ██ ██      ██                                       │");
    solharm_output!("│                                                                                                     │");
    solharm_output!("│   Real regular solid harmonics by recurrence                                          {version:>13} │");
    solharm_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    solharm_output!("");
}

/// Generation and batched evaluation of real regular solid harmonics.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML configuration file describing the evaluation job. If absent, a default job is run.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stem of the output files. If given, the report is written to `<OUTPUT>.out` and
    /// diagnostics to `<OUTPUT>.log`; otherwise, both go to the terminal.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum degree overriding that in the configuration, as an integer or as an
    /// angular-momentum letter (S, P, D, F, G, H, I).
    #[arg(short = 'l', long, value_parser = parse_max_degree)]
    pub max_degree: Option<u32>,

    /// Writes the effective configuration to `<WRITE_CONFIG>.yml` before running.
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

/// Configures `log4rs` for the `solharm` binary.
///
/// The `solharm-output` logger carries the report at the `Info` level. All other records are
/// diagnostics: they go to standard error at the `Warn` level when `output` is `None`, and to
/// `<output>.log` at the `Debug` level otherwise.
///
/// # Arguments
///
/// * `output` - Optional stem of the output files.
pub fn configure_logging(output: Option<&Path>) -> Result<(), anyhow::Error> {
    let (report, diagnostics, diagnostics_level): (Box<dyn Append>, Box<dyn Append>, LevelFilter) =
        if let Some(stem) = output {
            let mut out_path = stem.to_path_buf();
            out_path.set_extension("out");
            let mut log_path = stem.to_path_buf();
            log_path.set_extension("log");
            (
                Box::new(
                    FileAppender::builder()
                        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                        .append(false)
                        .build(out_path)?,
                ),
                Box::new(
                    FileAppender::builder()
                        .encoder(Box::new(PatternEncoder::new(
                            "{d(%Y-%m-%d %H:%M:%S)} {l:<5} [{t}] {m}{n}",
                        )))
                        .append(false)
                        .build(log_path)?,
                ),
                LevelFilter::Debug,
            )
        } else {
            (
                Box::new(
                    ConsoleAppender::builder()
                        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                        .build(),
                ),
                Box::new(
                    ConsoleAppender::builder()
                        .target(Target::Stderr)
                        .encoder(Box::new(PatternEncoder::new("{l:<5} [{t}] {m}{n}")))
                        .build(),
                ),
                LevelFilter::Warn,
            )
        };

    let config = Config::builder()
        .appender(Appender::builder().build("report", report))
        .appender(Appender::builder().build("diagnostics", diagnostics))
        .logger(
            Logger::builder()
                .appender("report")
                .additive(false)
                .build("solharm-output", LevelFilter::Info),
        )
        .build(
            Root::builder()
                .appender("diagnostics")
                .build(diagnostics_level),
        )
        .map_err(|err| format_err!("Invalid logging configuration: {err}"))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}

/// Assembles the input for a command-line invocation.
///
/// The input is read from `cli.config` if given, and defaults to [`Input::default`] otherwise.
/// The maximum degree is then overridden by `cli.max_degree` if given.
pub fn assemble_input(cli: &Cli) -> Result<Input, anyhow::Error> {
    let mut inp: Input = if let Some(config) = cli.config.as_ref() {
        log::debug!("Reading configuration from {}.", config.display());
        read_solharm_yaml(config)?
    } else {
        log::debug!("No configuration supplied. The default job will be run.");
        Input::default()
    };
    if let Some(lmax) = cli.max_degree {
        log::debug!(
            "Maximum degree overridden from {} to {lmax}.",
            inp.evaluation.max_degree
        );
        inp.evaluation.max_degree = lmax;
    }
    Ok(inp)
}

/// Runs a command-line invocation after logging has been configured.
pub fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    log_heading();
    let res = assemble_input(cli).and_then(|inp| {
        if let Some(name) = cli.write_config.as_ref() {
            write_solharm_yaml(name, &inp)?;
            solharm_output!("Configuration written to {}.", name.with_extension("yml").display());
            solharm_output!("");
        }
        inp.handle()
    });
    if let Err(err) = res.as_ref() {
        solharm_error!("{err:#}");
    }
    res
}
