//! Attaches a color to every emitted segment.
//!
//! 2D drawings are colored either by spreading the hue circle across all
//! segments ([`ColorMode::Spectral`]) or by looking up the symbol that drew each
//! segment ([`ColorMode::Symbols`]). 3D drawings only get two fixed colors, a
//! branch color and a leaf-tip point color; there is no per-symbol 3D palette
//! because the spatial interpreter tags segments with depth, not symbol.
//!
//! Coloring never drops, adds or reorders segments.

use crate::error::{LSystemError, Result};
use crate::geometry::{Segment2d, Segment3d, TaggedSegment2d, leaf_tip_flags};
use palette::{FromColor, Hsv, Srgb};
use std::collections::HashMap;
use std::str::FromStr;

/// 8-bit sRGB color handed to renderers.
pub type Color = Srgb<u8>;

/// Color of segments whose symbol has no palette entry.
pub const FALLBACK_COLOR: Color = palette::named::WHITE;

/// Parses `#RGB` / `#RRGGBB` hex or a named color such as `"white"`.
pub fn parse_color(value: &str) -> Result<Color> {
    let trimmed = value.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return Color::from_str(hex).map_err(|_| LSystemError::UnknownColor {
            value: value.to_string(),
        });
    }
    palette::named::from_str(&trimmed.to_ascii_lowercase()).ok_or_else(|| {
        LSystemError::UnknownColor {
            value: value.to_string(),
        }
    })
}

/// `n` colors walking the full hue circle at full saturation and value.
///
/// Sample `i` gets hue `i / (n - 1)` of a turn, so the first and last are
/// both red, as with a resampled `hsv` colormap.
pub fn spectral_colors(n: usize) -> Vec<Color> {
    let denom = n.saturating_sub(1).max(1) as f32;
    (0..n)
        .map(|i| {
            let hsv: Hsv = Hsv::new(360.0 * i as f32 / denom, 1.0, 1.0);
            Srgb::<f32>::from_color(hsv).into_format::<u8>()
        })
        .collect()
}

/// How 2D segments get their colors.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorMode {
    /// Spread the hue circle evenly over the segments in emission order.
    Spectral,
    /// Color by the symbol that drew each segment, [`FALLBACK_COLOR`] if absent.
    Symbols(HashMap<char, Color>),
}

/// A 2D segment ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredSegment2d {
    pub segment: Segment2d,
    pub color: Color,
}

/// A 3D segment ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSegment3d {
    pub segment: Segment3d,
    /// Stroke color of the branch.
    pub main_color: Color,
    /// Color of the point drawn at the end if `leaf_tip` is set.
    pub point_color: Color,
    /// The end point starts no other segment and should be highlighted.
    pub leaf_tip: bool,
}

/// Pairs every segment with its color under `mode`, in emission order.
pub fn colorize_2d(segments: &[TaggedSegment2d], mode: &ColorMode) -> Vec<ColoredSegment2d> {
    match mode {
        ColorMode::Spectral => segments
            .iter()
            .zip(spectral_colors(segments.len()))
            .map(|(tagged, color)| ColoredSegment2d {
                segment: tagged.segment,
                color,
            })
            .collect(),
        ColorMode::Symbols(lookup) => segments
            .iter()
            .map(|tagged| ColoredSegment2d {
                segment: tagged.segment,
                color: lookup
                    .get(&tagged.symbol)
                    .copied()
                    .unwrap_or(FALLBACK_COLOR),
            })
            .collect(),
    }
}

/// Applies the branch and leaf colors. Leaf tips are only flagged when
/// `show_points` is set.
pub fn colorize_3d(
    segments: &[Segment3d],
    main_color: Color,
    point_color: Color,
    show_points: bool,
) -> Vec<RenderSegment3d> {
    let leaves = if show_points {
        leaf_tip_flags(segments)
    } else {
        vec![false; segments.len()]
    };
    segments
        .iter()
        .zip(leaves)
        .map(|(segment, leaf_tip)| RenderSegment3d {
            segment: *segment,
            main_color,
            point_color,
            leaf_tip,
        })
        .collect()
}
