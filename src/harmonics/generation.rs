//! Symbolic generation of real regular solid harmonics by recurrence.
//!
//! The recurrence relations are those of Helgaker, T., Jørgensen, P. & Olsen, J.
//! *Molecular Electronic-Structure Theory* (Wiley, 2000), Section 6.4.2, p. 215.

use log;

use crate::harmonics::polynomial::{Exponents, Polynomial, ONE, X, Y, Z};

#[cfg(test)]
#[path = "generation_tests.rs"]
mod generation_tests;

/// The exponents of the monomials $`x^2`$, $`y^2`$, and $`z^2`$ whose sum is $`r^2`$.
const R2_COMPONENTS: [Exponents; 3] = [(2, 0, 0), (0, 2, 0), (0, 0, 2)];

// ==================
// Struct definitions
// ==================

/// Structure to contain the polynomials of all real regular solid harmonics $`S_{lm}`$ with
/// $`0 \le l \le L`$ and $`-l \le m \le l`$.
#[derive(Clone, Debug)]
pub struct SolidHarmonicTable {
    /// The maximum degree $`L`$.
    lmax: u32,

    /// The solid harmonics indexed first by degree $`l`$ and then by $`m + l`$.
    harmonics: Vec<Vec<Polynomial>>,
}

impl SolidHarmonicTable {
    /// Generates all solid harmonics up to and including a maximum degree.
    ///
    /// Degrees $`0`$ and $`1`$ are seeded with $`S_{00} = 1`$, $`S_{1,-1} = y`$,
    /// $`S_{10} = z`$, and $`S_{11} = x`$. Each higher degree $`l + 1`$ is then built from
    /// degrees $`l`$ and $`l - 1`$: the two outermost orders by vertical recurrence and the
    /// remaining $`2l + 1`$ orders by horizontal recurrence.
    ///
    /// The work and memory grow with the number of monomials of degree at most $`L`$, *i.e.*
    /// as $`O(L^3)`$ per harmonic; bounding $`L`$ is the responsibility of the caller.
    ///
    /// # Arguments
    ///
    /// * `lmax` - The maximum degree $`L`$.
    ///
    /// # Returns
    ///
    /// The generated table.
    pub fn generate(lmax: u32) -> Self {
        let mut harmonics: Vec<Vec<Polynomial>> = Vec::with_capacity(lmax as usize + 1);
        harmonics.push(vec![Polynomial::monomial(ONE, 1.0)]);
        if lmax >= 1 {
            // Ordered by increasing m: y, z, x.
            harmonics.push(vec![
                Polynomial::monomial(Y, 1.0),
                Polynomial::monomial(Z, 1.0),
                Polynomial::monomial(X, 1.0),
            ]);
        }

        for l in 1..lmax {
            let li32 = degree_i32(l);
            let lowest = vertical_recurrence_min(&harmonics, l);
            let highest = vertical_recurrence_max(&harmonics, l);
            let mut next = Vec::with_capacity(2 * l as usize + 3);
            next.push(lowest);
            next.extend((-li32..=li32).map(|m| horizontal_recurrence(&harmonics, l, m)));
            next.push(highest);
            harmonics.push(next);
            log::debug!("Solid harmonics of degree {} generated.", l + 1);
        }

        Self { lmax, harmonics }
    }

    /// Returns the maximum degree $`L`$ of this table.
    pub fn lmax(&self) -> u32 {
        self.lmax
    }

    /// Returns the solid harmonic $`S_{lm}`$, or `None` if $`l > L`$ or $`\lvert m \rvert > l`$.
    pub fn get(&self, l: u32, m: i32) -> Option<&Polynomial> {
        if m.unsigned_abs() > l {
            return None;
        }
        let mi = usize::try_from(i64::from(m) + i64::from(l)).ok()?;
        self.harmonics.get(l as usize)?.get(mi)
    }

    /// Returns an iterator over all `(l, m, S_lm)` ordered by increasing $`l`$ and then by
    /// increasing $`m`$, which is the row order of the coefficient cache.
    pub fn iter(&self) -> impl Iterator<Item = (u32, i32, &Polynomial)> + '_ {
        self.harmonics.iter().enumerate().flat_map(|(l, slms)| {
            let l = u32::try_from(l).unwrap_or_else(|_| panic!("Unable to convert `{l}` to `u32`."));
            let li32 = degree_i32(l);
            slms.iter()
                .zip(-li32..=li32)
                .map(move |(slm, m)| (l, m, slm))
        })
    }
}

// =========
// Functions
// =========

/// Converts a degree to `i32` so that orders can be ranged over.
fn degree_i32(l: u32) -> i32 {
    i32::try_from(l).unwrap_or_else(|_| panic!("Unable to convert `{l}` to `i32`."))
}

/// Returns the already generated solid harmonic $`S_{lm}`$.
///
/// # Panics
///
/// Panics if $`S_{lm}`$ has not been generated yet.
fn slm(harmonics: &[Vec<Polynomial>], l: u32, m: i32) -> &Polynomial {
    let mi = usize::try_from(i64::from(m) + i64::from(l))
        .unwrap_or_else(|_| panic!("Order {m} lies outside [-{l}, {l}]."));
    harmonics
        .get(l as usize)
        .and_then(|slms| slms.get(mi))
        .unwrap_or_else(|| panic!("Solid harmonic ({l}, {m}) has not been generated."))
}

/// Returns the normalisation factor
///
/// ```math
/// A_l = \sqrt{\frac{2^{\delta_{l0}} (2l + 1)}{2l + 2}}
/// ```
///
/// of the vertical recurrences.
pub fn normalisation(l: u32) -> f64 {
    let kdelta = u8::from(l == 0);
    let lf = f64::from(l);
    (f64::from(2u8.pow(u32::from(kdelta))) * (2.0 * lf + 1.0) / (2.0 * lf + 2.0)).sqrt()
}

/// Generates $`S_{l+1, l+1}`$ from degree $`l`$ via
///
/// ```math
/// S_{l+1, l+1} = A_l \left( x S_{ll} - y S_{l,-l} \right).
/// ```
pub fn vertical_recurrence_max(harmonics: &[Vec<Polynomial>], l: u32) -> Polynomial {
    let li32 = degree_i32(l);
    let a = normalisation(l);
    slm(harmonics, l, li32).times(X, a) + slm(harmonics, l, -li32).times(Y, -a)
}

/// Generates $`S_{l+1, -l-1}`$ from degree $`l`$ via
///
/// ```math
/// S_{l+1, -l-1} = A_l \left( y S_{ll} + x S_{l,-l} \right).
/// ```
pub fn vertical_recurrence_min(harmonics: &[Vec<Polynomial>], l: u32) -> Polynomial {
    let li32 = degree_i32(l);
    let a = normalisation(l);
    slm(harmonics, l, li32).times(Y, a) + slm(harmonics, l, -li32).times(X, a)
}

/// Generates $`S_{l+1, m}`$ for $`-l \le m \le l`$ from degrees $`l`$ and $`l - 1`$ via
///
/// ```math
/// S_{l+1, m} = \frac{(2l + 1) z S_{lm}}{\sqrt{(l + m + 1)(l - m + 1)}}
///     - \sqrt{\frac{(l + m)(l - m)}{(l + m + 1)(l - m + 1)}} r^2 S_{l-1, m}.
/// ```
///
/// The second term vanishes whenever $`\lvert m \rvert = l`$, which is exactly when
/// $`S_{l-1, m}`$ does not exist, so it is only formed for $`\lvert m \rvert < l`$.
///
/// # Panics
///
/// Panics if $`l = 0`$ or $`\lvert m \rvert > l`$.
pub fn horizontal_recurrence(harmonics: &[Vec<Polynomial>], l: u32, m: i32) -> Polynomial {
    assert!(l >= 1, "`l` must be at least 1.");
    assert!(
        m.unsigned_abs() <= l,
        "Index `m` = {m} lies outside [-{l}, {l}]."
    );
    let lf = f64::from(l);
    let mf = f64::from(m);
    let c0 = (2.0 * lf + 1.0) / ((lf + mf + 1.0) * (lf - mf + 1.0)).sqrt();
    let zterm = slm(harmonics, l, m).times(Z, c0);

    if m.unsigned_abs() < l {
        let c1 = -((lf + mf) * (lf - mf) / ((lf + mf + 1.0) * (lf - mf + 1.0))).sqrt();
        let slm1 = slm(harmonics, l - 1, m);
        R2_COMPONENTS
            .iter()
            .fold(zterm, |acc, r2comp| acc + slm1.times(*r2comp, c1))
    } else {
        zterm
    }
}
