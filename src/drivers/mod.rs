//! Drivers to carry out solid-harmonic functionalities.

use anyhow;

pub mod solid_harmonic_evaluation;

// =================
// Trait definitions
// =================

/// Trait defining behaviours of solid-harmonic drivers.
pub trait SolidHarmonicsDriver {
    /// The type of the successful outcome when executing the driver.
    type Outcome;

    /// Executes the driver and stores the result internally.
    fn run(&mut self) -> Result<(), anyhow::Error>;

    /// Returns the result of the driver execution.
    fn result(&self) -> Result<&Self::Outcome, anyhow::Error>;
}
