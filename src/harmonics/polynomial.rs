//! Sparse polynomials in the three Cartesian variables $`x`$, $`y`$, and $`z`$.

use std::fmt;
use std::ops::Add;

use indexmap::IndexMap;
use itertools::Itertools;
use nalgebra::Point3;
use num_traits::Zero;

#[cfg(test)]
#[path = "polynomial_tests.rs"]
mod polynomial_tests;

/// A tuple $`(i, j, k)`$ of the non-negative exponents of the monomial $`x^i y^j z^k`$.
pub type Exponents = (u32, u32, u32);

/// The exponents of the constant monomial $`1`$.
pub const ONE: Exponents = (0, 0, 0);

/// The exponents of the monomial $`x`$.
pub const X: Exponents = (1, 0, 0);

/// The exponents of the monomial $`y`$.
pub const Y: Exponents = (0, 1, 0);

/// The exponents of the monomial $`z`$.
pub const Z: Exponents = (0, 0, 1);

/// Structure to manage a polynomial in $`x`$, $`y`$, and $`z`$ as a mapping from monomial
/// exponents to real coefficients.
///
/// Coefficients that are exactly zero are never stored: an absent monomial has a coefficient of
/// zero. Monomials are kept in the order in which they first appeared, so iteration is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    /// The non-zero coefficients keyed by monomial exponents.
    terms: IndexMap<Exponents, f64>,
}

impl Polynomial {
    /// Constructs the zero polynomial.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a polynomial from a sequence of `(exponents, coefficient)` terms.
    ///
    /// Terms sharing the same exponents are summed, and any resulting zero coefficients are
    /// dropped.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (Exponents, f64)>,
    {
        let mut poly = Self::new();
        for (exponents, coeff) in terms {
            *poly.terms.entry(exponents).or_insert(0.0) += coeff;
        }
        poly.prune();
        poly
    }

    /// Constructs a polynomial consisting of the single monomial `coeff * x^i y^j z^k`.
    pub fn monomial(exponents: Exponents, coeff: f64) -> Self {
        Self::from_terms([(exponents, coeff)])
    }

    /// Removes all terms whose coefficients are exactly zero.
    fn prune(&mut self) {
        self.terms.retain(|_, coeff| !coeff.is_zero());
    }

    /// Returns an iterator over the `(exponents, coefficient)` terms of this polynomial.
    pub fn terms(&self) -> impl Iterator<Item = (&Exponents, &f64)> + '_ {
        self.terms.iter()
    }

    /// Returns the coefficient of the monomial with the given exponents, or zero if the monomial
    /// is absent.
    pub fn coefficient(&self, exponents: &Exponents) -> f64 {
        self.terms.get(exponents).copied().unwrap_or(0.0)
    }

    /// Returns the number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Checks if this is the zero polynomial.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the common total degree of all monomials in this polynomial.
    ///
    /// # Returns
    ///
    /// `Some(degree)` if the polynomial is homogeneous and non-zero, `None` otherwise.
    pub fn degree(&self) -> Option<u32> {
        let mut degrees = self.terms.keys().map(|(i, j, k)| i + j + k);
        let first = degrees.next()?;
        if degrees.all(|d| d == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Multiplies this polynomial by the monomial `coeff * x^i y^j z^k`.
    ///
    /// # Arguments
    ///
    /// * `exponents` - The exponents $`(i, j, k)`$ of the multiplying monomial.
    /// * `coeff` - The coefficient of the multiplying monomial.
    ///
    /// # Returns
    ///
    /// A new polynomial. `self` is left untouched.
    pub fn times(&self, exponents: Exponents, coeff: f64) -> Self {
        let (di, dj, dk) = exponents;
        Self::from_terms(
            self.terms
                .iter()
                .map(|((i, j, k), c)| ((i + di, j + dj, k + dk), c * coeff)),
        )
    }

    /// Evaluates this polynomial at a single point term by term.
    ///
    /// This is the reference path for a single polynomial; batched evaluation of whole families
    /// of polynomials should go through [`super::evaluation::SolidHarmonics`].
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        self.terms
            .iter()
            .map(|((i, j, k), c)| {
                c * point.x.powi(exponent_i32(*i))
                    * point.y.powi(exponent_i32(*j))
                    * point.z.powi(exponent_i32(*k))
            })
            .sum()
    }
}

/// Converts a monomial exponent to the `i32` expected by [`f64::powi`].
fn exponent_i32(e: u32) -> i32 {
    i32::try_from(e).unwrap_or_else(|_| panic!("Unable to convert the exponent `{e}` to `i32`."))
}

/// Adds two polynomials.
///
/// Neither input is modified. Coefficients of common monomials are summed, and any that cancel
/// to exactly zero are removed from the result.
pub fn add(a: &Polynomial, b: &Polynomial) -> Polynomial {
    let mut sum = a.clone();
    for (exponents, coeff) in b.terms.iter() {
        *sum.terms.entry(*exponents).or_insert(0.0) += coeff;
    }
    sum.prune();
    sum
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        add(self, rhs)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        add(&self, &rhs)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let terms = self.terms.iter().enumerate().map(|(n, ((i, j, k), c))| {
            let vars = ["x", "y", "z"]
                .iter()
                .zip([*i, *j, *k])
                .filter_map(|(var, e)| match e {
                    0 => None,
                    1 => Some((*var).to_string()),
                    _ => Some(format!("{var}**{e}")),
                })
                .collect_vec();
            let sign = match (n, c.is_sign_negative()) {
                (0, true) => "-",
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            };
            if vars.is_empty() {
                format!("{sign}{:.4}", c.abs())
            } else {
                format!("{sign}{:.4} * {}", c.abs(), vars.join(" * "))
            }
        });
        write!(f, "{}", terms.collect::<String>())
    }
}
