//! Turtle state and the symbol-to-operation map.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Heading of a fresh planar turtle, in degrees (pointing up, `+Y`).
pub const DEFAULT_STARTING_ROTATION: f32 = 90.0;

/// Cursor of the planar (2D) turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarTurtle {
    /// Current position of the pen.
    pub position: Vec2,
    /// Heading in degrees, counter-clockwise from `+X`.
    pub heading: f32,
}

impl PlanarTurtle {
    /// A turtle at the origin facing `heading` degrees.
    pub fn new(heading: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            heading,
        }
    }

    /// Unit vector along the current heading.
    pub fn forward(&self) -> Vec2 {
        let radians = self.heading.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }
}

impl Default for PlanarTurtle {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_ROTATION)
    }
}

/// Cursor of the spatial (3D) turtle.
///
/// Orientation is a spherical pair: `pitch` is measured from the `+Z` axis and
/// `yaw` within the XY plane. The default faces straight along `+Y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialTurtle {
    /// Current world-space position of the pen.
    pub position: Vec3,
    /// Degrees within the XY plane.
    pub yaw: f32,
    /// Degrees from the `+Z` axis.
    pub pitch: f32,
    /// Branch nesting level; 0 at the root.
    pub depth: u32,
}

impl Default for SpatialTurtle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 90.0,
            pitch: 90.0,
            depth: 0,
        }
    }
}

impl SpatialTurtle {
    /// Unit vector for the current yaw/pitch pair.
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            pitch.sin() * yaw.cos(),
            pitch.sin() * yaw.sin(),
            pitch.cos(),
        )
    }
}

/// Operations that can be performed by a turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Step forward by the configured length and emit a segment.
    Draw,
    /// Turn in the horizontal plane by `sign × angle` (`+`/`-`).
    Yaw(f32),
    /// Tilt by `sign × angle` (`&`/`^`). Spatial turtle only.
    Pitch(f32),
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op: symbol has no turtle meaning.
    Ignore,
}

/// Resolves symbols to [`TurtleOp`]s.
///
/// Explicit entries win; anything else draws if `alphabetic_draws` is set and
/// the symbol is alphabetic, and is otherwise ignored.
#[derive(Clone, Debug)]
pub struct SymbolMap {
    ops: HashMap<char, TurtleOp>,
    alphabetic_draws: bool,
}

impl SymbolMap {
    /// Planar conventions: every letter draws, `+`/`-` turn, `[`/`]` branch.
    pub fn planar() -> Self {
        let mut map = Self {
            ops: HashMap::new(),
            alphabetic_draws: true,
        };
        map.set_op('+', TurtleOp::Yaw(1.0));
        map.set_op('-', TurtleOp::Yaw(-1.0));
        map.set_op('[', TurtleOp::Push);
        map.set_op(']', TurtleOp::Pop);
        map
    }

    /// Spatial conventions: only `F` draws; other letters are grammar
    /// bookkeeping. `&`/`^` pitch down/up.
    pub fn spatial() -> Self {
        let mut map = Self {
            ops: HashMap::new(),
            alphabetic_draws: false,
        };
        map.set_op('F', TurtleOp::Draw);
        map.set_op('+', TurtleOp::Yaw(1.0));
        map.set_op('-', TurtleOp::Yaw(-1.0));
        map.set_op('&', TurtleOp::Pitch(1.0));
        map.set_op('^', TurtleOp::Pitch(-1.0));
        map.set_op('[', TurtleOp::Push);
        map.set_op(']', TurtleOp::Pop);
        map
    }

    /// Assigns `op` to `symbol`, overriding the default classification.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.ops.insert(symbol, op);
    }

    /// The operation `symbol` performs under this map.
    pub fn resolve(&self, symbol: char) -> TurtleOp {
        match self.ops.get(&symbol) {
            Some(op) => *op,
            None if self.alphabetic_draws && symbol.is_alphabetic() => TurtleOp::Draw,
            None => TurtleOp::Ignore,
        }
    }
}
