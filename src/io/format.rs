//! Nicely formatted report output.

use std::fmt;

use log;

const BANNER_LENGTH: usize = 103;

/// Logs an error to the `solharm-output` logger, as well as to the default logger.
macro_rules! solharm_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "solharm-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `solharm-output` logger.
macro_rules! solharm_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "solharm-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `solharm-output` logger.
macro_rules! solharm_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "solharm-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {solharm_error, solharm_output, solharm_warn};

/// Logs a nicely formatted section title to the `solharm-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    solharm_output!("┌──{bar}──┐");
    solharm_output!("│§ {title:^length$} §│");
    solharm_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `solharm-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    solharm_output!("{}", subtitle);
    solharm_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `solharm-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    solharm_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `solharm-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    solharm_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging outputs nicely, line by line.
pub(crate) trait SolHarmOutput: fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            solharm_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> SolHarmOutput for T where T: fmt::Display {}
