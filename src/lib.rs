//! # solharm: real regular solid harmonics
//!
//! This crate generates the real regular solid harmonics $`S_{lm}(x, y, z)`$ of all degrees
//! $`0 \le l \le L`$ symbolically as polynomials in $`x`$, $`y`$, and $`z`$, and evaluates the
//! whole family at batches of points through a dense coefficient cache.
//!
//! - [`harmonics::polynomial`] provides a small sparse polynomial algebra in three variables.
//! - [`harmonics::generation`] builds the harmonics by the vertical and horizontal recurrences.
//! - [`harmonics::evaluation`] lays the coefficients out in a matrix indexed by harmonic and by
//!   monomial, and evaluates all harmonics at many points with a single matrix product.
//! - [`drivers`] and [`interfaces`] wrap the above into configurable, logged jobs, as used by
//!   the `solharm` binary.
//!
//! ## Example
//!
//! ```
//! use nalgebra::Point3;
//! use solharm::harmonics::evaluation::SolidHarmonics;
//!
//! let sh = SolidHarmonics::new(2).unwrap();
//! let values = sh.evaluate(&[Point3::new(1.0, 2.0, 3.0)]);
//! assert_eq!(values.dim(), (1, 9));
//! assert_eq!(values[(0, 2)], 3.0);
//! ```

pub mod drivers;
pub mod harmonics;
pub mod interfaces;
pub mod io;
