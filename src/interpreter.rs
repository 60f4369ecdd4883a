//! Interpreters that walk an expanded symbol string and emit line segments.
//!
//! Two variants share one shape: [`PlanarInterpreter`] (2D, single heading)
//! and [`SpatialInterpreter`] (3D, yaw/pitch plus branch depth). Configure one
//! with its config struct, optionally override symbol meanings via
//! [`set_op`](PlanarInterpreter::set_op), then call `interpret`.

use crate::error::{LSystemError, Result};
use crate::geometry::{Segment2d, Segment3d, TaggedSegment2d};
use crate::turtle::{DEFAULT_STARTING_ROTATION, PlanarTurtle, SpatialTurtle, SymbolMap, TurtleOp};

/// Default maximum nesting of `[` before interpretation fails.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 1024;

/// Configuration for 2D interpretation.
#[derive(Clone, Debug)]
pub struct PlanarConfig {
    /// Turn for `+`/`-`, in degrees.
    pub angle: f32,
    /// Distance covered by each drawing symbol.
    pub step: f32,
    /// Initial heading in degrees. Default: 90 (up).
    pub starting_rotation: f32,
    /// Maximum branch nesting for push/pop operations.
    pub max_stack_depth: usize,
}

impl Default for PlanarConfig {
    fn default() -> Self {
        Self {
            angle: 90.0,
            step: 1.0,
            starting_rotation: DEFAULT_STARTING_ROTATION,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
        }
    }
}

/// Configuration for 3D interpretation.
#[derive(Clone, Debug)]
pub struct SpatialConfig {
    /// Turn for `+`/`-` (yaw) and `&`/`^` (pitch), in degrees.
    pub angle: f32,
    /// Distance covered by each `F`.
    pub step: f32,
    /// Maximum branch nesting for push/pop operations.
    pub max_stack_depth: usize,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            angle: 25.0,
            step: 1.0,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
        }
    }
}

/// Result of a 2D interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarPath {
    /// Segments in emission order, each tagged with the symbol that drew it.
    pub segments: Vec<TaggedSegment2d>,
    /// The cursor after the last symbol.
    pub final_turtle: PlanarTurtle,
    /// `[` left without a matching `]` at end of input.
    pub open_branches: usize,
}

impl PlanarPath {
    /// Number of segments drawn.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Result of a 3D interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialPath {
    /// Segments in emission order, each carrying its branch depth.
    pub segments: Vec<Segment3d>,
    /// The cursor after the last symbol, depth included.
    pub final_turtle: SpatialTurtle,
    /// `[` left without a matching `]` at end of input.
    pub open_branches: usize,
}

impl SpatialPath {
    /// Number of segments drawn.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Interprets symbol strings as planar turtle commands.
pub struct PlanarInterpreter {
    symbols: SymbolMap,
    config: PlanarConfig,
}

impl PlanarInterpreter {
    /// Creates an interpreter using [`SymbolMap::planar`].
    pub fn new(config: PlanarConfig) -> Self {
        Self {
            symbols: SymbolMap::planar(),
            config,
        }
    }

    /// Replaces the symbol map in one step (builder pattern).
    pub fn with_map(mut self, symbols: SymbolMap) -> Self {
        self.symbols = symbols;
        self
    }

    /// Assigns a single [`TurtleOp`] to `symbol`, overriding the default map.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.symbols.set_op(symbol, op);
    }

    /// The configuration this interpreter was built with.
    pub fn config(&self) -> &PlanarConfig {
        &self.config
    }

    /// Walks `symbols` left to right and returns the emitted segments.
    ///
    /// The turtle starts at the origin facing `starting_rotation`. Each
    /// drawing symbol emits exactly one segment. `[` saves position and
    /// heading, `]` restores them exactly.
    ///
    /// # Errors
    ///
    /// [`LSystemError::UnbalancedBracket`] on a `]` with nothing to pop, and
    /// [`LSystemError::StackOverflow`] when nesting exceeds `max_stack_depth`.
    /// Positions are char indices into `symbols`.
    pub fn interpret(&self, symbols: &str) -> Result<PlanarPath> {
        let mut turtle = PlanarTurtle::new(self.config.starting_rotation);
        let mut stack: Vec<PlanarTurtle> = Vec::new();
        let mut segments = Vec::new();

        for (position, symbol) in symbols.chars().enumerate() {
            match self.symbols.resolve(symbol) {
                TurtleOp::Draw => {
                    let start = turtle.position;
                    let end = start + turtle.forward() * self.config.step;
                    segments.push(TaggedSegment2d {
                        segment: Segment2d { start, end },
                        symbol,
                    });
                    turtle.position = end;
                }
                TurtleOp::Yaw(s) => turtle.heading += self.config.angle * s,
                // No second axis in the plane.
                TurtleOp::Pitch(_) => {}
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LSystemError::StackOverflow {
                            position,
                            limit: self.config.max_stack_depth,
                        });
                    }
                    stack.push(turtle);
                }
                TurtleOp::Pop => {
                    turtle = stack
                        .pop()
                        .ok_or(LSystemError::UnbalancedBracket { position })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        if !stack.is_empty() {
            tracing::warn!(open = stack.len(), "input ended inside unclosed branches");
        }
        tracing::debug!(segments = segments.len(), "planar interpretation complete");

        Ok(PlanarPath {
            segments,
            final_turtle: turtle,
            open_branches: stack.len(),
        })
    }
}

/// Interprets symbol strings as spatial turtle commands.
pub struct SpatialInterpreter {
    symbols: SymbolMap,
    config: SpatialConfig,
}

impl SpatialInterpreter {
    /// Creates an interpreter using [`SymbolMap::spatial`].
    pub fn new(config: SpatialConfig) -> Self {
        Self {
            symbols: SymbolMap::spatial(),
            config,
        }
    }

    /// Replaces the symbol map in one step (builder pattern).
    pub fn with_map(mut self, symbols: SymbolMap) -> Self {
        self.symbols = symbols;
        self
    }

    /// Assigns a single [`TurtleOp`] to `symbol`, overriding the default map.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.symbols.set_op(symbol, op);
    }

    /// The configuration this interpreter was built with.
    pub fn config(&self) -> &SpatialConfig {
        &self.config
    }

    /// Walks `symbols` left to right and returns the emitted segments.
    ///
    /// The turtle starts at the origin with yaw = pitch = 90° and depth 0.
    /// `[` saves position, yaw, pitch and depth and then enters a deeper
    /// branch; `]` restores all of them, so depth returns to its pre-branch
    /// value rather than being decremented.
    ///
    /// # Errors
    ///
    /// Same as [`PlanarInterpreter::interpret`].
    pub fn interpret(&self, symbols: &str) -> Result<SpatialPath> {
        let mut turtle = SpatialTurtle::default();
        let mut stack: Vec<SpatialTurtle> = Vec::new();
        let mut segments = Vec::new();

        for (position, symbol) in symbols.chars().enumerate() {
            match self.symbols.resolve(symbol) {
                TurtleOp::Draw => {
                    let start = turtle.position;
                    let end = start + turtle.forward() * self.config.step;
                    segments.push(Segment3d {
                        start,
                        end,
                        depth: turtle.depth,
                    });
                    turtle.position = end;
                }
                TurtleOp::Yaw(s) => turtle.yaw += self.config.angle * s,
                TurtleOp::Pitch(s) => turtle.pitch += self.config.angle * s,
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LSystemError::StackOverflow {
                            position,
                            limit: self.config.max_stack_depth,
                        });
                    }
                    stack.push(turtle);
                    turtle.depth += 1;
                }
                TurtleOp::Pop => {
                    turtle = stack
                        .pop()
                        .ok_or(LSystemError::UnbalancedBracket { position })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        if !stack.is_empty() {
            tracing::warn!(open = stack.len(), "input ended inside unclosed branches");
        }
        tracing::debug!(
            segments = segments.len(),
            max_depth = segments.iter().map(|s| s.depth).max().unwrap_or(0),
            "spatial interpretation complete"
        );

        Ok(SpatialPath {
            segments,
            final_turtle: turtle,
            open_branches: stack.len(),
        })
    }
}

/// Interprets `symbols` in 2D with the default planar symbol map.
pub fn interpret_2d(
    symbols: &str,
    angle: f32,
    step: f32,
    starting_rotation: f32,
) -> Result<Vec<TaggedSegment2d>> {
    let config = PlanarConfig {
        angle,
        step,
        starting_rotation,
        ..Default::default()
    };
    Ok(PlanarInterpreter::new(config).interpret(symbols)?.segments)
}

/// Interprets `symbols` in 3D with the default spatial symbol map.
pub fn interpret_3d(symbols: &str, angle: f32, step: f32) -> Result<Vec<Segment3d>> {
    let config = SpatialConfig {
        angle,
        step,
        ..Default::default()
    };
    Ok(SpatialInterpreter::new(config).interpret(symbols)?.segments)
}
