//! Line geometry emitted by the interpreters, plus the few measurements a
//! renderer needs to frame it.
//!
//! Every collection here keeps emission order: renderers draw, and animate,
//! segments in exactly the order the turtle produced them. Empty inputs are
//! valid and yield `None` bounds rather than panicking.

use bevy_math::bounding::{Aabb2d, Aabb3d, BoundingVolume};
use bevy_math::{Isometry2d, Isometry3d};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Margin conventionally left around a 2D drawing, see [`Bounds2d::with_margin`].
pub const DEFAULT_MARGIN: f32 = 10.0;

/// A straight 2D line from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment2d {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment2d {
    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A 2D segment together with the symbol that drew it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedSegment2d {
    pub segment: Segment2d,
    pub symbol: char,
}

/// A 3D segment and the branch depth it was drawn at.
///
/// Depth is rendering metadata only; it never affects positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment3d {
    pub start: Vec3,
    pub end: Vec3,
    pub depth: u32,
}

impl Segment3d {
    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned extent of a 2D drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2d {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds2d {
    /// Bounds of every endpoint, or `None` when there are no segments.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a Segment2d>) -> Option<Self> {
        let points: Vec<Vec2> = segments
            .into_iter()
            .flat_map(|s| [s.start, s.end])
            .collect();
        if points.is_empty() {
            return None;
        }
        let aabb = Aabb2d::from_point_cloud(Isometry2d::IDENTITY, &points);
        Some(Self {
            min: aabb.min,
            max: aabb.max,
        })
    }

    /// Grows the box by `margin` on every side.
    pub fn with_margin(self, margin: f32) -> Self {
        let grown = Aabb2d {
            min: self.min,
            max: self.max,
        }
        .grow(Vec2::splat(margin));
        Self {
            min: grown.min,
            max: grown.max,
        }
    }

    /// Width and height.
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// A cube that frames a 3D drawing with equal scale on every axis.
///
/// Centered on the mean of all endpoints (not the box center), with a half
/// extent of half the largest axis span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCube {
    pub center: Vec3,
    pub half_extent: f32,
}

impl ViewCube {
    /// Cube around every endpoint, or `None` when there are no segments.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a Segment3d>) -> Option<Self> {
        let points: Vec<Vec3> = segments
            .into_iter()
            .flat_map(|s| [s.start, s.end])
            .collect();
        if points.is_empty() {
            return None;
        }
        let aabb = Aabb3d::from_point_cloud(Isometry3d::IDENTITY, points.iter().copied());
        let span = Vec3::from(aabb.max - aabb.min);
        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        Some(Self {
            center,
            half_extent: span.max_element() / 2.0,
        })
    }

    /// Lowest corner.
    pub fn min(&self) -> Vec3 {
        self.center - Vec3::splat(self.half_extent)
    }

    /// Highest corner.
    pub fn max(&self) -> Vec3 {
        self.center + Vec3::splat(self.half_extent)
    }
}

/// Deepest branch level among `segments`; `1` when there are none.
pub fn max_depth<'a>(segments: impl IntoIterator<Item = &'a Segment3d>) -> u32 {
    segments.into_iter().map(|s| s.depth).max().unwrap_or(1)
}

/// Stroke width for a segment at `depth`: trunks are thicker, tips thinner.
pub fn line_width(depth: u32, max_depth: u32) -> f32 {
    1.5 + max_depth.saturating_sub(depth) as f32 * 0.5
}

/// Hashable exact-bits key for a point. `-0.0` and `0.0` compare equal.
fn point_key(p: Vec3) -> [u32; 3] {
    (p + Vec3::ZERO).to_array().map(f32::to_bits)
}

/// For each segment, whether its end point is a leaf tip: a point that no
/// segment starts from. Comparison is exact, so only positions the turtle
/// actually revisited (e.g. by popping a branch) count as shared.
pub fn leaf_tip_flags(segments: &[Segment3d]) -> Vec<bool> {
    let starts: HashSet<[u32; 3]> = segments.iter().map(|s| point_key(s.start)).collect();
    segments
        .iter()
        .map(|s| !starts.contains(&point_key(s.end)))
        .collect()
}

/// End points of every leaf segment, in emission order.
pub fn leaf_tips(segments: &[Segment3d]) -> Vec<Vec3> {
    segments
        .iter()
        .zip(leaf_tip_flags(segments))
        .filter_map(|(s, leaf)| leaf.then_some(s.end))
        .collect()
}
