//! Core geometry for the editor stage.
//!
//! This module centralizes the coordinate math used throughout the engine so
//! every consumer calls the same primitives instead of re-deriving rotation
//! and clamping formulas inline.
//!
//! Two rectangle types exist on purpose: [`DragRect`] carries signed
//! width/height and only ever lives inside an active gesture, while
//! [`Region`] is always normalized (`w, h >= 0`) and is the only rectangle
//! shape consumed by hit-testing, rendering, and history.

use serde::{Deserialize, Serialize};

/// A point in stage coordinates (or image coordinates where stated).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair for the image or the stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// A rectangle whose width/height may be negative mid-gesture.
///
/// Produced while a drag is in flight; converted to a [`Region`] via
/// [`DragRect::normalized`] before anything outside the gesture sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DragRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Flip negative extents and shift the origin so `w, h >= 0`.
    pub fn normalized(self) -> Region {
        let Self { mut x, mut y, mut w, mut h } = self;
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Region { x, y, w, h }
    }
}

/// A normalized rectangle: origin at the top-left corner, `w, h >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    /// Build a region from any corner pair, normalizing as needed.
    pub fn from_corners(a: Point, b: Point) -> Self {
        DragRect::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shift the region by a delta without changing its size.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Round origin to the nearest unit and extents to at least one unit.
    /// Used when handing the region to the rasterizer.
    pub fn rounded(&self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
            w: self.w.round().max(1.0),
            h: self.h.round().max(1.0),
        }
    }
}

/// Axis-aligned bounds in stage space, typically the image's un-rotated box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Bounds of an image placed at `offset` with extent `size`.
    pub fn from_placement(offset: Point, size: Size) -> Self {
        Self {
            left: offset.x,
            top: offset.y,
            right: offset.x + size.w,
            bottom: offset.y + size.h,
        }
    }

    /// Bounds of the stage itself.
    pub fn from_stage(view: Size) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: view.w,
            bottom: view.h,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Saturating clamp: when the interval is inverted the low bound wins.
/// Edge-resize math can transiently produce `max < min` (a one-unit region
/// pinned at a boundary), so this must never panic like `f32::clamp` does.
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    min.max(v.min(max))
}

/// Component-wise clamp of a point into axis-aligned bounds.
pub fn clamp_point(p: Point, b: Bounds) -> Point {
    Point::new(clamp(p.x, b.left, b.right), clamp(p.y, b.top, b.bottom))
}

pub fn to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Rotate `p` about `center` by `degrees`, clockwise-positive.
pub fn rotate_around(p: Point, center: Point, degrees: f32) -> Point {
    let r = to_rad(degrees);
    let (sin, cos) = r.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}
