//! # fractal-turtle
//!
//! A symbolic engine for Lindenmayer systems: it rewrites an axiom under
//! deterministic or stochastic production rules, then walks the expanded
//! string with a 2D or 3D turtle to produce an ordered list of line segments.
//!
//! The pipeline only runs forward: [`rewriter`] → [`interpreter`] →
//! [`colorize`] → your renderer. Each stage is a pure function of its inputs
//! plus an injected [`RandomSource`], so seeded runs are reproducible.
//!
//! ```
//! use fractal_turtle::{PresetCatalog, RngSource};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! # fn main() -> fractal_turtle::Result<()> {
//! let catalog = PresetCatalog::builtin();
//! let mut rng = RngSource(StdRng::seed_from_u64(7));
//! if let Some(gosper) = catalog.get_2d("gosper") {
//!     let drawing = gosper.render(&mut rng)?;
//!     assert_eq!(drawing.segments.len(), 2401);
//! }
//! # Ok(())
//! # }
//! ```

pub mod colorize;
pub mod error;
pub mod geometry;
pub mod grammar;
pub mod interpreter;
pub mod preset;
pub mod rewriter;
pub mod turtle;

pub use colorize::*;
pub use error::*;
pub use geometry::*;
pub use grammar::*;
pub use interpreter::*;
pub use preset::*;
pub use rewriter::*;
pub use turtle::*;
