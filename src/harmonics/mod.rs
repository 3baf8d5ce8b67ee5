//! Real regular solid harmonics: polynomial algebra, generation by recurrence, and batched
//! evaluation through a dense coefficient cache.

use std::error::Error;
use std::fmt;

use anyhow::format_err;
use phf::phf_map;

pub mod evaluation;
pub mod generation;
pub mod polynomial;


/// The largest maximum degree for which a [`evaluation::SolidHarmonics`] set may be constructed.
///
/// The dense coefficient cache holds $`(L+1)^2 \times (L+1)(L+2)(L+3)/6`$ values, so its size
/// grows as $`O(L^5)`$. At this bound the cache occupies roughly 57 MiB.
pub const MAX_DEGREE: u32 = 32;

/// Alphabetical labels of angular momenta.
pub static ANGMOM_LABELS: [&str; 7] = ["S", "P", "D", "F", "G", "H", "I"];

/// Indices of alphabetical labels of angular momenta.
pub static ANGMOM_INDICES: phf::Map<&'static str, u32> = phf_map! {
    "S" => 0,
    "P" => 1,
    "D" => 2,
    "F" => 3,
    "G" => 4,
    "H" => 5,
    "I" => 6,
};

/// Error for invalid solid-harmonic construction or evaluation requests.
#[derive(Debug, Clone)]
pub struct HarmonicsError(pub String);

impl fmt::Display for HarmonicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Solid harmonics error: {}", self.0)
    }
}

impl Error for HarmonicsError {}

/// Returns the row index $`l(l+1) + m`$ of the solid harmonic $`S_{lm}`$.
///
/// Rows are ordered by increasing $`l`$ and, within each degree, by increasing $`m`$, so that
/// degrees $`0, \ldots, L`$ occupy the indices $`0, \ldots, (L+1)^2 - 1`$ exactly once.
///
/// # Panics
///
/// Panics if $`\lvert m \rvert > l`$.
pub fn harmonic_index(l: u32, m: i32) -> usize {
    assert!(
        m.unsigned_abs() <= l,
        "m must be between -l and l (inclusive)."
    );
    let li64 = i64::from(l);
    usize::try_from(li64 * (li64 + 1) + i64::from(m))
        .unwrap_or_else(|_| panic!("Unable to convert the index of ({l}, {m}) to `usize`."))
}

/// Returns a short label for the solid harmonic $`S_{lm}`$, *e.g.* `S`, `P-1`, `P0`, `D+2`.
///
/// Degrees beyond the alphabetical labels are written numerically, *e.g.* `(7)-3`.
pub fn harmonic_label(l: u32, m: i32) -> String {
    let lstr = ANGMOM_LABELS
        .get(l as usize)
        .map(|lab| (*lab).to_string())
        .unwrap_or_else(|| format!("({l})"));
    match (l, m) {
        (0, _) => lstr,
        (_, 0) => format!("{lstr}0"),
        _ => format!("{lstr}{m:+}"),
    }
}

/// Parses a maximum degree given either as a non-negative integer or as an angular-momentum
/// letter (`S`, `P`, `D`, ...).
///
/// # Errors
///
/// Errors if the string is neither, or if the degree exceeds [`MAX_DEGREE`].
pub fn parse_max_degree(s: &str) -> Result<u32, anyhow::Error> {
    let trimmed = s.trim();
    let lmax = match ANGMOM_INDICES.get(trimmed.to_uppercase().as_str()) {
        Some(l) => *l,
        None => trimmed.parse::<u32>().map_err(|_| {
            format_err!("`{trimmed}` is neither a non-negative integer nor an angular-momentum label.")
        })?,
    };
    validate_max_degree(lmax)?;
    Ok(lmax)
}

/// Checks that a maximum degree lies within the supported bound.
pub(crate) fn validate_max_degree(lmax: u32) -> Result<(), HarmonicsError> {
    if lmax > MAX_DEGREE {
        Err(HarmonicsError(format!(
            "maximum degree {lmax} exceeds the supported bound of {MAX_DEGREE}"
        )))
    } else {
        Ok(())
    }
}
