//! Dense coefficient caching and batched evaluation of real regular solid harmonics.

use std::fmt;

use itertools::{iproduct, Itertools};
use log;
use nalgebra::Point3;
use ndarray::{s, Array1, Array2, Array3, ArrayView2, Zip};

use crate::harmonics::generation::SolidHarmonicTable;
use crate::harmonics::polynomial::{Exponents, Polynomial};
use crate::harmonics::{harmonic_index, validate_max_degree, HarmonicsError};

#[cfg(test)]
#[path = "evaluation_tests.rs"]
mod evaluation_tests;

// =========
// Functions
// =========

/// Returns the number $`(L+1)^2`$ of solid harmonics of degree at most $`L`$, saturating at
/// [`usize::MAX`].
pub fn n_harmonics(lmax: u32) -> usize {
    let lmax = u128::from(lmax);
    usize::try_from((lmax + 1).pow(2)).unwrap_or(usize::MAX)
}

/// Returns the number $`(L+1)(L+2)(L+3)/6`$ of monomials $`x^i y^j z^k`$ with
/// $`i + j + k \le L`$, saturating at [`usize::MAX`].
pub fn n_monomials(lmax: u32) -> usize {
    let lmax = u128::from(lmax);
    usize::try_from(((lmax + 1) * (lmax + 2) * (lmax + 3)).div_euclid(6)).unwrap_or(usize::MAX)
}

/// Returns an iterator over all exponent tuples $`(a, b, c)`$ with $`a + b + c \le L`$.
///
/// The tuples are those of the Cartesian product $`[0, L]^3`$ with $`a`$ varying slowest and
/// $`c`$ fastest, keeping only those whose sum does not exceed $`L`$. This enumeration order
/// defines the columns of the coefficient cache.
pub fn cartesian_exponents(lmax: u32) -> impl Iterator<Item = Exponents> {
    iproduct!(0..=lmax, 0..=lmax, 0..=lmax).filter(move |(a, b, c)| a + b + c <= lmax)
}

/// Returns the position of an exponent tuple in the enumeration of [`cartesian_exponents`]
/// without performing the enumeration.
///
/// The position is given in closed form by
///
/// ```math
/// \frac{6 + 11a - 6a^2 + a^3 + 9b - 6ab - 3b^2 + 6c + 12aL - 3a^2L + 6bL + 3aL^2}{6} - 1.
/// ```
///
/// # Arguments
///
/// * `exponents` - The tuple $`(a, b, c)`$, which must satisfy $`a + b + c \le L`$.
/// * `lmax` - The maximum degree $`L`$.
///
/// # Returns
///
/// The zero-based position.
///
/// # Panics
///
/// Panics if $`a + b + c > L`$.
pub fn lexicographic_position(exponents: &Exponents, lmax: u32) -> usize {
    let (a, b, c) = *exponents;
    assert!(
        a + b + c <= lmax,
        "The exponents ({a}, {b}, {c}) exceed the maximum degree {lmax}."
    );
    let (a, b, c, l) = (
        i64::from(a),
        i64::from(b),
        i64::from(c),
        i64::from(lmax),
    );
    let num = 6 + 11 * a - 6 * a * a + a * a * a + 9 * b - 6 * a * b - 3 * b * b + 6 * c
        + 12 * a * l
        - 3 * a * a * l
        + 6 * b * l
        + 3 * a * l * l;
    usize::try_from(num.div_euclid(6) - 1).unwrap_or_else(|_| {
        panic!("Unable to convert the position of ({a}, {b}, {c}) to `usize`.")
    })
}

// ==================
// Struct definitions
// ==================

/// Structure to evaluate all real regular solid harmonics $`S_{lm}`$ with $`0 \le l \le L`$ at
/// batches of points.
///
/// On construction, the harmonics are generated symbolically and their coefficients are laid out
/// in a dense matrix $`\mathbf{C}`$ with one row per harmonic (see [`harmonic_index`]) and one
/// column per monomial (see [`lexicographic_position`]). Evaluating at $`N`$ points then amounts
/// to forming the $`N \times C`$ matrix $`\mathbf{M}`$ of monomial values and computing
/// $`\mathbf{M}\mathbf{C}^{\mathsf{T}}`$.
///
/// Everything is built once; a [`SolidHarmonics`] is immutable afterwards.
#[derive(Clone, Debug)]
pub struct SolidHarmonics {
    /// The maximum degree $`L`$.
    lmax: u32,

    /// The symbolic solid harmonics.
    table: SolidHarmonicTable,

    /// The $`(L+1)^2 \times C(L)`$ coefficient matrix.
    coefficients: Array2<f64>,

    /// The monomial exponents in column order.
    exponents: Vec<Exponents>,
}

impl SolidHarmonics {
    /// Generates and caches all solid harmonics up to and including a maximum degree.
    ///
    /// # Arguments
    ///
    /// * `lmax` - The maximum degree $`L`$.
    ///
    /// # Errors
    ///
    /// Errors if `lmax` exceeds [`super::MAX_DEGREE`].
    pub fn new(lmax: u32) -> Result<Self, HarmonicsError> {
        validate_max_degree(lmax)?;
        let table = SolidHarmonicTable::generate(lmax);
        let exponents = cartesian_exponents(lmax).collect_vec();
        debug_assert_eq!(exponents.len(), n_monomials(lmax));

        let mut coefficients = Array2::<f64>::zeros((n_harmonics(lmax), n_monomials(lmax)));
        for (l, m, slm) in table.iter() {
            let row = harmonic_index(l, m);
            for (lcartqns, coeff) in slm.terms() {
                coefficients[(row, lexicographic_position(lcartqns, lmax))] = *coeff;
            }
        }
        log::debug!(
            "Cached {} solid harmonics over {} monomials ({} non-zero coefficients).",
            coefficients.nrows(),
            coefficients.ncols(),
            coefficients.iter().filter(|c| **c != 0.0).count()
        );

        Ok(Self {
            lmax,
            table,
            coefficients,
            exponents,
        })
    }

    /// Returns the maximum degree $`L`$.
    pub fn lmax(&self) -> u32 {
        self.lmax
    }

    /// Returns the symbolic solid harmonics.
    pub fn table(&self) -> &SolidHarmonicTable {
        &self.table
    }

    /// Returns the symbolic solid harmonic $`S_{lm}`$, if it is part of this set.
    pub fn harmonic(&self, l: u32, m: i32) -> Option<&Polynomial> {
        self.table.get(l, m)
    }

    /// Returns the dense coefficient matrix.
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Returns the monomial exponents in column order.
    pub fn exponents(&self) -> &[Exponents] {
        &self.exponents
    }

    /// Returns the number of solid harmonics in this set.
    pub fn n_harmonics(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Returns the number of monomials spanning this set.
    pub fn n_monomials(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Evaluates all solid harmonics at a batch of points.
    ///
    /// # Arguments
    ///
    /// * `points` - The $`N`$ points.
    ///
    /// # Returns
    ///
    /// An $`N \times (L+1)^2`$ matrix whose element $`(n, l(l+1)+m)`$ is $`S_{lm}`$ evaluated
    /// at the $`n`$-th point.
    pub fn evaluate(&self, points: &[Point3<f64>]) -> Array2<f64> {
        let coordinates = Array2::from_shape_fn((points.len(), 3), |(n, ax)| points[n][ax]);
        self.contract(coordinates.view())
    }

    /// Evaluates all solid harmonics at a batch of points given as rows of an array.
    ///
    /// # Arguments
    ///
    /// * `points` - An $`N \times 3`$ array of Cartesian coordinates.
    ///
    /// # Returns
    ///
    /// An $`N \times (L+1)^2`$ matrix as in [`Self::evaluate`].
    ///
    /// # Errors
    ///
    /// Errors if `points` does not have exactly three columns.
    pub fn evaluate_array(&self, points: ArrayView2<f64>) -> Result<Array2<f64>, HarmonicsError> {
        if points.ncols() != 3 {
            return Err(HarmonicsError(format!(
                "expected points as an N × 3 array, but got {} column{}",
                points.ncols(),
                if points.ncols() == 1 { "" } else { "s" }
            )));
        }
        Ok(self.contract(points))
    }

    /// Evaluates all solid harmonics at a single point.
    pub fn evaluate_point(&self, point: &Point3<f64>) -> Array1<f64> {
        self.evaluate(std::slice::from_ref(point)).row(0).to_owned()
    }

    /// Computes the values of every cached monomial at every point.
    ///
    /// The powers $`x^e`$, $`y^e`$, $`z^e`$ for $`0 \le e \le L`$ are tabulated once by
    /// successive multiplication starting from one, so that $`0^0 = 1`$.
    ///
    /// # Arguments
    ///
    /// * `coordinates` - An $`N \times 3`$ array of Cartesian coordinates.
    ///
    /// # Returns
    ///
    /// The $`N \times C(L)`$ matrix of monomial values.
    fn monomial_values(&self, coordinates: ArrayView2<f64>) -> Array2<f64> {
        let npoints = coordinates.nrows();
        let lmax = self.lmax as usize;

        // powers[(axis, n, e)] = r_axis^e
        let mut powers = Array3::<f64>::ones((3, npoints, lmax + 1));
        for e in 1..=lmax {
            let (prev, mut cur) = powers.multi_slice_mut((s![.., .., e - 1], s![.., .., e]));
            Zip::from(&mut cur)
                .and(&prev)
                .and(&coordinates.t())
                .for_each(|c, &p, &r| *c = p * r);
        }

        let mut monomials = Array2::<f64>::zeros((npoints, self.exponents.len()));
        for (col, (i, j, k)) in self.exponents.iter().enumerate() {
            Zip::from(monomials.column_mut(col))
                .and(powers.slice(s![0, .., *i as usize]))
                .and(powers.slice(s![1, .., *j as usize]))
                .and(powers.slice(s![2, .., *k as usize]))
                .for_each(|v, &px, &py, &pz| *v = px * py * pz);
        }
        monomials
    }

    /// Contracts the monomial values at the given coordinates with the coefficient cache.
    fn contract(&self, coordinates: ArrayView2<f64>) -> Array2<f64> {
        self.monomial_values(coordinates)
            .dot(&self.coefficients.t())
    }
}

impl fmt::Display for SolidHarmonics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SolidHarmonics[L = {}: {} {} over {} {}]",
            self.lmax,
            self.n_harmonics(),
            if self.n_harmonics() == 1 {
                "harmonic"
            } else {
                "harmonics"
            },
            self.n_monomials(),
            if self.n_monomials() == 1 {
                "monomial"
            } else {
                "monomials"
            }
        )
    }
}
