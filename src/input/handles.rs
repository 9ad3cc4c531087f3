//! Handle and rotation-grip placement, hit-testing, and resize edge rules.
//!
//! A region has eight resize handles (corners and edge midpoints) and, in
//! pan mode, one rotation grip floating above its top-center. Hit-testing is
//! a squared-distance circle test; radii are enlarged for coarse (touch)
//! pointers. Callers are responsible for the rotation branch: in pan mode
//! handle anchors rotate with the image (or equivalently the pointer is
//! un-rotated first), in crop mode everything stays axis-aligned.

use crate::constants::{
    COARSE_HANDLE_HIT_RADIUS, COARSE_ROTATE_HIT_RADIUS, HANDLE_HIT_RADIUS, MIN_REGION_SIZE,
    ROTATE_HANDLE_OFFSET, ROTATE_HIT_RADIUS,
};
use crate::geometry::{Bounds, Point, Region, clamp};

/// One of the eight resize handles on a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    W,
    E,
}

impl Handle {
    pub fn all() -> [Handle; 8] {
        [
            Handle::Nw,
            Handle::Ne,
            Handle::Sw,
            Handle::Se,
            Handle::N,
            Handle::S,
            Handle::W,
            Handle::E,
        ]
    }

    /// Where this handle sits on a normalized region.
    pub fn anchor(self, r: &Region) -> Point {
        match self {
            Handle::Nw => Point::new(r.x, r.y),
            Handle::Ne => Point::new(r.x + r.w, r.y),
            Handle::Sw => Point::new(r.x, r.y + r.h),
            Handle::Se => Point::new(r.x + r.w, r.y + r.h),
            Handle::N => Point::new(r.x + r.w / 2.0, r.y),
            Handle::S => Point::new(r.x + r.w / 2.0, r.y + r.h),
            Handle::W => Point::new(r.x, r.y + r.h / 2.0),
            Handle::E => Point::new(r.x + r.w, r.y + r.h / 2.0),
        }
    }
}

/// Pointer precision, used to widen hit radii on touch devices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerAccuracy {
    #[default]
    Fine,
    Coarse,
}

impl PointerAccuracy {
    pub fn handle_radius(self) -> f32 {
        match self {
            Self::Fine => HANDLE_HIT_RADIUS,
            Self::Coarse => COARSE_HANDLE_HIT_RADIUS,
        }
    }

    pub fn rotate_radius(self) -> f32 {
        match self {
            Self::Fine => ROTATE_HIT_RADIUS,
            Self::Coarse => COARSE_ROTATE_HIT_RADIUS,
        }
    }
}

/// What the pointer is hovering, for cursor feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverTarget {
    #[default]
    None,
    Handle(Handle),
    RotationGrip,
}

/// The eight handle anchors of a region, in a fixed test order.
pub fn handle_positions(r: &Region) -> [(Handle, Point); 8] {
    Handle::all().map(|h| (h, h.anchor(r)))
}

/// The rotation grip floats a fixed distance above the region's top-center.
pub fn rotation_grip_position(r: &Region) -> Point {
    Point::new(r.x + r.w / 2.0, r.y - ROTATE_HANDLE_OFFSET)
}

/// Squared-distance circle test.
pub fn hit_circle(center: Point, p: Point, radius: f32) -> bool {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

/// First handle whose circle contains `p`, testing axis-aligned anchors.
pub fn hit_handle(r: &Region, p: Point, radius: f32) -> Option<Handle> {
    handle_positions(r)
        .into_iter()
        .find(|(_, anchor)| hit_circle(*anchor, p, radius))
        .map(|(handle, _)| handle)
}

/// Apply one handle's edge-move rule to a region.
///
/// Each handle moves a fixed subset of the four edges toward the (already
/// clamped, un-rotated) pointer `p`; every move is clamped so the region
/// keeps at least [`MIN_REGION_SIZE`] on each axis and stays inside
/// `bounds`. The fixed edges never move.
pub fn resize_region(r: &Region, handle: Handle, p: Point, bounds: Bounds) -> Region {
    let left0 = r.left();
    let top0 = r.top();
    let right0 = r.right();
    let bottom0 = r.bottom();
    let (mut left, mut top, mut right, mut bottom) = (left0, top0, right0, bottom0);

    match handle {
        Handle::Nw => {
            left = clamp(p.x, bounds.left, right0 - MIN_REGION_SIZE);
            top = clamp(p.y, bounds.top, bottom0 - MIN_REGION_SIZE);
        }
        Handle::Ne => {
            right = clamp(p.x, left0 + MIN_REGION_SIZE, bounds.right);
            top = clamp(p.y, bounds.top, bottom0 - MIN_REGION_SIZE);
        }
        Handle::Sw => {
            left = clamp(p.x, bounds.left, right0 - MIN_REGION_SIZE);
            bottom = clamp(p.y, top0 + MIN_REGION_SIZE, bounds.bottom);
        }
        Handle::Se => {
            right = clamp(p.x, left0 + MIN_REGION_SIZE, bounds.right);
            bottom = clamp(p.y, top0 + MIN_REGION_SIZE, bounds.bottom);
        }
        Handle::N => top = clamp(p.y, bounds.top, bottom0 - MIN_REGION_SIZE),
        Handle::S => bottom = clamp(p.y, top0 + MIN_REGION_SIZE, bounds.bottom),
        Handle::W => left = clamp(p.x, bounds.left, right0 - MIN_REGION_SIZE),
        Handle::E => right = clamp(p.x, left0 + MIN_REGION_SIZE, bounds.right),
    }

    Region {
        x: left.min(right),
        y: top.min(bottom),
        w: (right - left).abs().max(MIN_REGION_SIZE),
        h: (bottom - top).abs().max(MIN_REGION_SIZE),
    }
}
