//! Input specification for solid-harmonic evaluation jobs.

use std::path::PathBuf;

use anyhow::{self, format_err};
use log;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::drivers::solid_harmonic_evaluation::{
    SolidHarmonicEvaluationDriver, SolidHarmonicEvaluationParams,
};
use crate::drivers::SolidHarmonicsDriver;
use crate::interfaces::InputHandle;
use crate::io::format::{log_macsec_begin, log_macsec_end, solharm_output};
use crate::io::read_points;

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;

/// An enumerated type representing possible sources of the points at which the solid harmonics
/// are to be evaluated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PointsSource {
    /// Variant indicating that the points are listed directly in the input, each as a
    /// `[x, y, z]` sequence.
    Inline(Vec<Point3<f64>>),

    /// Variant indicating that the points are to be read in from a text file with three
    /// whitespace-separated columns. See [`read_points`] for the format.
    FromFile(PathBuf),
}

impl PointsSource {
    /// Resolves this source into the actual points.
    pub fn resolve(&self) -> Result<Vec<Point3<f64>>, anyhow::Error> {
        match self {
            PointsSource::Inline(points) => Ok(points.clone()),
            PointsSource::FromFile(path) => {
                let points = read_points(path)?;
                log::debug!("Read {} points from {}.", points.len(), path.display());
                Ok(points)
            }
        }
    }
}

impl Default for PointsSource {
    fn default() -> Self {
        PointsSource::Inline(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ])
    }
}

/// A structure containing input parameters which can be serialised into and deserialised from a
/// YAML input file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Input {
    /// Control parameters for the evaluation.
    ///
    /// # Default
    ///
    /// If not specified, [`SolidHarmonicEvaluationParams::default`] is used.
    #[serde(default)]
    pub evaluation: SolidHarmonicEvaluationParams,

    /// Source of the evaluation points.
    ///
    /// # Default
    ///
    /// If not specified, the three points $`(0, 0, 0)`$, $`(1, 0, 0)`$, and $`(1, 1, 1)`$ are
    /// used.
    #[serde(default)]
    pub points: PointsSource,
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        let points = self.points.resolve()?;
        log_macsec_begin("Solid-harmonic evaluation");
        solharm_output!("");
        let mut she_driver = SolidHarmonicEvaluationDriver::builder()
            .parameters(&self.evaluation)
            .points(&points)
            .build()
            .map_err(|err| format_err!(err))?;
        let res = she_driver.run();
        log_macsec_end("Solid-harmonic evaluation");
        solharm_output!("");
        res
    }
}
