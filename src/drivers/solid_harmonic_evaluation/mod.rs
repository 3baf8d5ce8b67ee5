use std::fmt;

use anyhow::{self, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use log;
use nalgebra::Point3;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::drivers::SolidHarmonicsDriver;
use crate::harmonics::evaluation::{n_harmonics, n_monomials, SolidHarmonics};
use crate::harmonics::{harmonic_index, harmonic_label, validate_max_degree};
use crate::io::format::{
    log_subtitle, log_title, nice_bool, solharm_output, solharm_warn, write_subtitle,
    SolHarmOutput,
};
use crate::io::{write_solharm_binary, SolHarmFileType};

#[cfg(test)]
#[path = "solid_harmonic_evaluation_tests.rs"]
mod solid_harmonic_evaluation_tests;

/// The number of harmonics printed side by side in the value report.
const VALUE_COLUMNS: usize = 6;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for solid-harmonic evaluation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SolidHarmonicEvaluationParams {
    /// The maximum degree $`L`$ of the solid harmonics to be evaluated.
    #[builder(default = "15")]
    #[serde(default = "default_max_degree")]
    pub max_degree: u32,

    /// Boolean indicating if the generated solid-harmonic polynomials are to be written to the
    /// output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_polynomials: bool,

    /// Boolean indicating if the evaluated values are to be written to the output.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub write_values: bool,

    /// Optional name for saving the result as a binary file of type [`SolHarmFileType::Val`]. If
    /// `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

fn default_max_degree() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

impl SolidHarmonicEvaluationParams {
    /// Returns a builder to construct a [`SolidHarmonicEvaluationParams`] structure.
    pub fn builder() -> SolidHarmonicEvaluationParamsBuilder {
        SolidHarmonicEvaluationParamsBuilder::default()
    }
}

impl Default for SolidHarmonicEvaluationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to build as default `SolidHarmonicEvaluationParams`.")
    }
}

impl fmt::Display for SolidHarmonicEvaluationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Maximum degree: {} ({} harmonics over {} monomials)",
            self.max_degree,
            n_harmonics(self.max_degree),
            n_monomials(self.max_degree)
        )?;
        writeln!(
            f,
            "Report generated polynomials: {}",
            nice_bool(self.write_polynomials)
        )?;
        writeln!(f, "Report evaluated values: {}", nice_bool(self.write_values))?;
        writeln!(
            f,
            "Save evaluation results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                format!("{name}.{}", SolHarmFileType::Val.ext())
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain solid-harmonic evaluation results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct SolidHarmonicEvaluationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: SolidHarmonicEvaluationParams,

    /// The points at which the solid harmonics have been evaluated.
    pub points: Vec<Point3<f64>>,

    /// The values of the solid harmonics, one row per point and one column per harmonic in the
    /// order given by [`harmonic_index`].
    pub values: Array2<f64>,
}

impl SolidHarmonicEvaluationResult {
    /// Returns a builder to construct a [`SolidHarmonicEvaluationResult`] structure.
    fn builder() -> SolidHarmonicEvaluationResultBuilder {
        SolidHarmonicEvaluationResultBuilder::default()
    }

    /// Returns the value of $`S_{lm}`$ at the `n`-th point, if present.
    pub fn value(&self, n: usize, l: u32, m: i32) -> Option<f64> {
        if l > self.parameters.max_degree || m.unsigned_abs() > l {
            return None;
        }
        self.values.get((n, harmonic_index(l, m))).copied()
    }

    /// Writes the evaluated values in nicely formatted tables of [`VALUE_COLUMNS`] harmonics
    /// each.
    fn write_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count_length = self.points.len().max(1).ilog10() as usize + 2;
        let labels = (0..=self.parameters.max_degree)
            .flat_map(|l| {
                let li32 = i32::try_from(l)
                    .unwrap_or_else(|_| panic!("Unable to convert `{l}` to `i32`."));
                (-li32..=li32).map(move |m| harmonic_label(l, m))
            })
            .collect_vec();
        let table_width = count_length + 15 * VALUE_COLUMNS;

        let chunks = labels.iter().enumerate().chunks(VALUE_COLUMNS);
        for chunk in &chunks {
            let chunk = chunk.collect_vec();
            writeln!(f, "{}", "┈".repeat(table_width))?;
            writeln!(
                f,
                "{:>count_length$}{}",
                "#",
                chunk.iter().map(|(_, label)| format!("{label:>15}")).join("")
            )?;
            writeln!(f, "{}", "┈".repeat(table_width))?;
            for (n, row) in self.values.rows().into_iter().enumerate() {
                writeln!(
                    f,
                    "{:>count_length$}{}",
                    n,
                    chunk
                        .iter()
                        .map(|(col, _)| format!("{:>+15.7e}", row[*col]))
                        .join("")
                )?;
            }
            writeln!(f, "{}", "┈".repeat(table_width))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for SolidHarmonicEvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let npoints = self.points.len();
        writeln!(
            f,
            "Evaluated {} solid {} at {} {}.",
            self.values.ncols(),
            if self.values.ncols() == 1 {
                "harmonic"
            } else {
                "harmonics"
            },
            npoints,
            if npoints == 1 { "point" } else { "points" }
        )?;
        writeln!(f)?;

        if self.parameters.write_values && npoints > 0 {
            let count_length = npoints.ilog10() as usize + 2;
            write_subtitle(f, "Points")?;
            writeln!(f, "{}", "┈".repeat(count_length + 45))?;
            writeln!(
                f,
                "{:>count_length$}{:>15}{:>15}{:>15}",
                "#", "x", "y", "z"
            )?;
            writeln!(f, "{}", "┈".repeat(count_length + 45))?;
            for (n, point) in self.points.iter().enumerate() {
                writeln!(
                    f,
                    "{:>count_length$}{:>+15.7}{:>+15.7}{:>+15.7}",
                    n, point.x, point.y, point.z
                )?;
            }
            writeln!(f, "{}", "┈".repeat(count_length + 45))?;
            writeln!(f)?;

            write_subtitle(f, "Solid-harmonic values")?;
            self.write_values(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for the evaluation of all real regular solid harmonics up to a maximum degree at a
/// set of points.
#[derive(Clone, Builder)]
pub struct SolidHarmonicEvaluationDriver<'a> {
    /// The control parameters for solid-harmonic evaluation.
    parameters: &'a SolidHarmonicEvaluationParams,

    /// The points at which the solid harmonics are to be evaluated.
    points: &'a [Point3<f64>],

    /// The result of the evaluation.
    #[builder(setter(skip), default = "None")]
    result: Option<SolidHarmonicEvaluationResult>,
}

impl<'a> SolidHarmonicEvaluationDriver<'a> {
    /// Returns a builder to construct a [`SolidHarmonicEvaluationDriver`] structure.
    pub fn builder() -> SolidHarmonicEvaluationDriverBuilder<'a> {
        SolidHarmonicEvaluationDriverBuilder::default()
    }

    /// Executes solid-harmonic generation and evaluation.
    fn evaluate_solid_harmonics(&mut self) -> Result<(), anyhow::Error> {
        log_title("Solid-Harmonic Evaluation");
        solharm_output!("");
        let params = self.parameters;
        validate_max_degree(params.max_degree)?;
        params.log_output_display();

        let sh = SolidHarmonics::new(params.max_degree)?;
        log::debug!("Constructed {sh}.");

        if params.write_polynomials {
            log_subtitle("Generated solid harmonics");
            solharm_output!("");
            for (l, m, slm) in sh.table().iter() {
                solharm_output!("{:>7}  {slm}", harmonic_label(l, m));
            }
            solharm_output!("");
        }

        if self.points.is_empty() {
            solharm_warn!("No points have been supplied. The evaluation result will be empty.");
            solharm_output!("");
        }
        let values = sh.evaluate(self.points);

        self.result = Some(
            SolidHarmonicEvaluationResult::builder()
                .parameters(params.clone())
                .points(self.points.to_vec())
                .values(values)
                .build()
                .map_err(|err| format_err!(err))?,
        );

        if let Some(res) = self.result.as_ref() {
            log_subtitle("Evaluation results");
            solharm_output!("");
            res.log_output_display();
            if let Some(name) = params.result_save_name.as_ref() {
                write_solharm_binary(name, SolHarmFileType::Val, res)?;
                solharm_output!(
                    "Solid-harmonic evaluation results saved as {name}.{}.",
                    SolHarmFileType::Val.ext()
                );
                solharm_output!("");
            }
        }

        Ok(())
    }
}

impl SolidHarmonicsDriver for SolidHarmonicEvaluationDriver<'_> {
    type Outcome = SolidHarmonicEvaluationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No solid-harmonic evaluation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.evaluate_solid_harmonics()
    }
}
