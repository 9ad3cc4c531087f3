//! Paint and erase stroke records.
//!
//! A stroke stores the image size at creation time (`base_size`) so that
//! rendering can scale its points and width proportionally when the image is
//! later resized, keeping the stroke visually anchored to image features.
//! Scaling happens at render time only; stored points are never mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Size};

/// Which tool produced a stroke. The tool decides the compositing rule:
/// `Brush` paints source-over on the drawing layer, `Eraser` is
/// destination-out on the drawing layer, `ImageEraser` is destination-out
/// on the image layer. The two erasers never affect each other's layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeTool {
    Brush,
    Eraser,
    ImageEraser,
}

/// Which space a stroke's points live in.
///
/// `Stage` points are fixed to the canvas viewport; `Image` points are local
/// to the image's un-rotated box and follow its transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateSpace {
    #[default]
    Stage,
    Image,
}

/// One continuous paint or erase gesture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: Uuid,
    pub tool: StrokeTool,
    /// Brush color; erasers carry none
    pub color: Option<String>,
    /// Line width at creation time
    pub size: f32,
    pub points: Vec<Point>,
    /// Image size when the stroke was created; `None` only for strokes
    /// recorded before an image existed (backfilled on the next resize)
    pub base_size: Option<Size>,
    /// Immutable once created
    #[serde(default)]
    pub coordinate_space: CoordinateSpace,
}

impl Stroke {
    /// Start a new stroke with its first point.
    pub fn begin(
        tool: StrokeTool,
        color: Option<String>,
        size: f32,
        first: Point,
        base_size: Option<Size>,
        coordinate_space: CoordinateSpace,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            color,
            size,
            points: vec![first],
            base_size,
            coordinate_space,
        }
    }

    pub fn is_image_eraser(&self) -> bool {
        self.tool == StrokeTool::ImageEraser
    }
}

/// A stroke's points and width scaled to the current image size.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledStroke {
    pub points: Vec<Point>,
    pub width: f32,
}

/// Scale stroke geometry from the size it was drawn at to `img_size`.
///
/// Points scale component-wise (x by the width ratio, y by the height
/// ratio); the line width scales by the mean of the two ratios.
pub fn scale_stroke(stroke: &Stroke, img_size: Size) -> ScaledStroke {
    let base = stroke.base_size.unwrap_or(img_size);
    let sx = if base.w != 0.0 { img_size.w / base.w } else { 1.0 };
    let sy = if base.h != 0.0 { img_size.h / base.h } else { 1.0 };
    ScaledStroke {
        points: stroke
            .points
            .iter()
            .map(|p| Point::new(p.x * sx, p.y * sy))
            .collect(),
        width: stroke.size * ((sx + sy) / 2.0),
    }
}

/// Assign a `base_size` to any stroke lacking one, exactly once.
///
/// Legacy strokes recorded before base-size tagging existed are pinned to
/// the image size at the time of backfill so future resizes scale them.
pub fn backfill_base_sizes(strokes: &mut [Stroke], img_size: Size) {
    for stroke in strokes.iter_mut().filter(|s| s.base_size.is_none()) {
        stroke.base_size = Some(img_size);
    }
}
