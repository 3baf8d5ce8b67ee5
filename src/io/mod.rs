//! Reading and writing of input files, point files, and result files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, bail, format_err, Context};
use bincode;
use nalgebra::Point3;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;

#[cfg(test)]
#[path = "io_tests.rs"]
mod io_tests;

/// An enumerated type for binary file types.
pub enum SolHarmFileType {
    /// Variant for binary files containing solid-harmonic evaluation results.
    Val,
}

impl SolHarmFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            SolHarmFileType::Val => "solharm.val".to_string(),
        }
    }
}

/// Reads a binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without the file-type extension).
/// * `file_type` - The type of the file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_solharm_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: SolHarmFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes it into a binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without the file-type extension).
/// * `file_type` - The type of the file to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_solharm_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: SolHarmFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a YAML configuration file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_solharm_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes it into a YAML configuration file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_solharm_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension("yml");
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads Cartesian points from a text file.
///
/// Each non-empty line not starting with `#` must contain exactly three whitespace-separated
/// real numbers $`x`$, $`y`$, and $`z`$.
///
/// # Arguments
///
/// * `name` - The path to the points file.
///
/// # Returns
///
/// A `Result` containing the points in file order.
pub fn read_points<P: AsRef<Path>>(name: P) -> Result<Vec<Point3<f64>>, anyhow::Error> {
    let path = name.as_ref();
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Unable to open {}.", path.display()))?,
    );
    parse_points(reader).with_context(|| format!("Unable to read points from {}.", path.display()))
}

/// Parses Cartesian points line by line from a buffered reader.
fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point3<f64>>, anyhow::Error> {
    let mut points = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let coordinates = trimmed
            .split_whitespace()
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|err| format_err!("Line {}: `{v}` is not a number ({err}).", i + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if coordinates.len() != 3 {
            bail!(
                "Line {}: expected three coordinates, but found {}.",
                i + 1,
                coordinates.len()
            );
        }
        points.push(Point3::new(coordinates[0], coordinates[1], coordinates[2]));
    }
    Ok(points)
}
