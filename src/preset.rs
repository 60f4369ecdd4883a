//! Preset records and the full rewrite → interpret → colorize pipeline.
//!
//! A preset is plain data (usually JSON). [`Preset2d::render`] and
//! [`Preset3d::render`] take a record directly; looking one up by name is the
//! job of a [`PresetCatalog`], which callers own and query themselves.

use crate::colorize::{
    Color, ColorMode, ColoredSegment2d, RenderSegment3d, colorize_2d, colorize_3d, parse_color,
};
use crate::error::Result;
use crate::geometry::{Bounds2d, ViewCube, line_width, max_depth};
use crate::grammar::{Grammar, Production};
use crate::interpreter::{PlanarConfig, PlanarInterpreter, SpatialConfig, SpatialInterpreter};
use crate::rewriter::{RandomSource, RewriteOptions, rewrite_with};
use crate::turtle::DEFAULT_STARTING_ROTATION;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

fn default_starting_rotation() -> f32 {
    DEFAULT_STARTING_ROTATION
}

/// Parameters of a 2D L-system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset2d {
    pub axiom: String,
    #[serde(default)]
    pub rules: BTreeMap<char, Production>,
    #[serde(default)]
    pub iterations: usize,
    /// Turn angle in degrees.
    pub angle: f32,
    pub step: f32,
    #[serde(default = "default_starting_rotation")]
    pub starting_rotation: f32,
    /// Per-symbol colors (hex or named). Ignored when `spectrum` is set.
    #[serde(default)]
    pub colors: Option<BTreeMap<char, String>>,
    /// Color segments along the hue circle instead of by symbol.
    #[serde(default)]
    pub spectrum: bool,
}

/// A colored 2D drawing in emission order.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing2d {
    pub segments: Vec<ColoredSegment2d>,
}

impl Drawing2d {
    /// Extent of the drawing, `None` if nothing was drawn.
    pub fn bounds(&self) -> Option<Bounds2d> {
        Bounds2d::from_segments(self.segments.iter().map(|s| &s.segment))
    }
}

impl Preset2d {
    /// The axiom and rules as a standalone [`Grammar`].
    pub fn grammar(&self) -> Grammar {
        Grammar {
            axiom: self.axiom.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Spectrum wins over a symbol palette; with neither, every segment gets
    /// the fallback color.
    pub fn color_mode(&self) -> Result<ColorMode> {
        if self.spectrum {
            return Ok(ColorMode::Spectral);
        }
        let mut lookup = HashMap::new();
        for (&symbol, value) in self.colors.iter().flatten() {
            lookup.insert(symbol, parse_color(value)?);
        }
        Ok(ColorMode::Symbols(lookup))
    }

    /// Runs the pipeline with no length ceiling.
    pub fn render<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Drawing2d> {
        self.render_with(rng, &RewriteOptions::default())
    }

    /// Runs the whole pipeline. Colors and grammar are validated before any
    /// rewriting starts.
    pub fn render_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        options: &RewriteOptions,
    ) -> Result<Drawing2d> {
        let mode = self.color_mode()?;
        let symbols = rewrite_with(&self.grammar(), self.iterations, rng, options)?;
        let interpreter = PlanarInterpreter::new(PlanarConfig {
            angle: self.angle,
            step: self.step,
            starting_rotation: self.starting_rotation,
            ..Default::default()
        });
        let path = interpreter.interpret(&symbols)?;
        Ok(Drawing2d {
            segments: colorize_2d(&path.segments, &mode),
        })
    }
}

/// Parameters of a 3D L-system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset3d {
    pub axiom: String,
    #[serde(default)]
    pub rules: BTreeMap<char, Production>,
    #[serde(default)]
    pub iterations: usize,
    pub angle: f32,
    pub step: f32,
    /// Branch color (hex or named).
    pub main_color: String,
    /// Leaf-tip point color (hex or named).
    pub point_color: String,
    /// Highlight leaf tips.
    #[serde(default)]
    pub points: bool,
}

/// A colored 3D drawing in emission order.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing3d {
    pub segments: Vec<RenderSegment3d>,
    /// Deepest branch level drawn; 1 for an empty drawing.
    pub max_depth: u32,
}

impl Drawing3d {
    /// Stroke width of segment `index`, thinning with branch depth.
    pub fn line_width(&self, index: usize) -> Option<f32> {
        self.segments
            .get(index)
            .map(|s| line_width(s.segment.depth, self.max_depth))
    }

    /// Equal-aspect framing cube, `None` if nothing was drawn.
    pub fn view_cube(&self) -> Option<ViewCube> {
        ViewCube::from_segments(self.segments.iter().map(|s| &s.segment))
    }
}

impl Preset3d {
    /// The axiom and rules as a standalone [`Grammar`].
    pub fn grammar(&self) -> Grammar {
        Grammar {
            axiom: self.axiom.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Parsed `(main_color, point_color)`.
    pub fn colors(&self) -> Result<(Color, Color)> {
        Ok((parse_color(&self.main_color)?, parse_color(&self.point_color)?))
    }

    /// Runs the pipeline with no length ceiling.
    pub fn render<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Drawing3d> {
        self.render_with(rng, &RewriteOptions::default())
    }

    /// Runs the whole pipeline. Colors and grammar are validated first.
    pub fn render_with<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        options: &RewriteOptions,
    ) -> Result<Drawing3d> {
        let (main_color, point_color) = self.colors()?;
        let symbols = rewrite_with(&self.grammar(), self.iterations, rng, options)?;
        let interpreter = SpatialInterpreter::new(SpatialConfig {
            angle: self.angle,
            step: self.step,
            ..Default::default()
        });
        let path = interpreter.interpret(&symbols)?;
        Ok(Drawing3d {
            max_depth: max_depth(&path.segments),
            segments: colorize_3d(&path.segments, main_color, point_color, self.points),
        })
    }
}

/// Named presets, kept apart per dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    #[serde(default, rename = "2d")]
    pub two_d: BTreeMap<String, Preset2d>,
    #[serde(default, rename = "3d")]
    pub three_d: BTreeMap<String, Preset3d>,
}

impl PresetCatalog {
    /// Parses a catalog of the form `{"2d": {name: preset}, "3d": {...}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The presets shipped with the crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert_2d(
            "gosper",
            Preset2d {
                axiom: "L".into(),
                rules: BTreeMap::from([
                    ('L', Production::Deterministic("L+R++R-L--LL-R+".into())),
                    ('R', Production::Deterministic("-L+RR++R+L--L-R".into())),
                ]),
                iterations: 4,
                angle: 60.0,
                step: 5.0,
                starting_rotation: DEFAULT_STARTING_ROTATION,
                colors: None,
                spectrum: true,
            },
        );
        catalog.insert_2d(
            "seaweed",
            Preset2d {
                axiom: "F".into(),
                rules: BTreeMap::from([(
                    'F',
                    Production::Deterministic("FF-[-F+F+F]+[+F-F-F]".into()),
                )]),
                iterations: 4,
                angle: 22.5,
                step: 5.0,
                starting_rotation: DEFAULT_STARTING_ROTATION,
                colors: None,
                spectrum: true,
            },
        );
        catalog.insert_3d(
            "bush",
            Preset3d {
                axiom: "A".into(),
                rules: BTreeMap::from([
                    (
                        'A',
                        Production::Stochastic(vec![
                            ("F[&+A][&-A][^A]".into(), 0.4),
                            ("F[&A][^+A]".into(), 0.3),
                            ("F[^-A]A".into(), 0.3),
                        ]),
                    ),
                    (
                        'F',
                        Production::Stochastic(vec![("FF".into(), 0.5), ("F".into(), 0.5)]),
                    ),
                ]),
                iterations: 5,
                angle: 25.0,
                step: 1.0,
                main_color: "#8b5a2b".into(),
                point_color: "#3cb043".into(),
                points: true,
            },
        );
        catalog
    }

    /// Adds a 2D preset, replacing any with the same name.
    pub fn insert_2d(&mut self, name: impl Into<String>, preset: Preset2d) {
        self.two_d.insert(name.into(), preset);
    }

    /// Adds a 3D preset, replacing any with the same name.
    pub fn insert_3d(&mut self, name: impl Into<String>, preset: Preset3d) {
        self.three_d.insert(name.into(), preset);
    }

    /// Looks up a 2D preset by name.
    pub fn get_2d(&self, name: &str) -> Option<&Preset2d> {
        self.two_d.get(name)
    }

    /// Looks up a 3D preset by name.
    pub fn get_3d(&self, name: &str) -> Option<&Preset3d> {
        self.three_d.get(name)
    }

    /// 2D preset names in sorted order.
    pub fn names_2d(&self) -> impl Iterator<Item = &str> {
        self.two_d.keys().map(String::as_str)
    }

    /// 3D preset names in sorted order.
    pub fn names_3d(&self) -> impl Iterator<Item = &str> {
        self.three_d.keys().map(String::as_str)
    }
}
