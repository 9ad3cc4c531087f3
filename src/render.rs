//! Display-list production for the external compositor.
//!
//! The engine does not draw. Each frame it can produce a [`Frame`], a pure
//! description of what to composite: the clipped, rotated image layer with
//! its subtractive image-eraser strokes, the freeform drawing layers, the
//! region overlay with its handles and rotation grip, and the image-eraser
//! cursor preview. Stroke layer separation is a hard invariant here: the
//! image eraser never affects freeform strokes and vice versa.

use crate::constants::ROTATE_HANDLE_OFFSET;
use crate::geometry::{Point, Region, Size, rotate_around};
use crate::input::handles::{Handle, handle_positions};
use crate::session::{EditorSession, Tool};
use crate::strokes::{CoordinateSpace, StrokeTool, scale_stroke};

/// How a stroke composites onto its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeOp {
    SourceOver,
    DestinationOut,
}

/// One stroke, resolved to drawable geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDraw {
    pub points: Vec<Point>,
    pub width: f32,
    pub color: String,
    pub op: CompositeOp,
}

/// The image layer: drawn at `offset`/`size`, rotated about its own center
/// by `rotation`, clipped to `clip` (in image-local coordinates), with the
/// image-eraser strokes punched out of it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    pub src: String,
    pub offset: Point,
    pub size: Size,
    pub rotation: i32,
    pub clip: Option<Region>,
    pub eraser_strokes: Vec<StrokeDraw>,
}

/// A handle circle in final stage coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayHandle {
    pub handle: Handle,
    pub at: Point,
}

/// The selection/crop overlay. `pivot`/`rotation` describe how the host
/// should rotate the dashed rectangle; handle and grip positions are
/// already in final stage coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionOverlay {
    pub region: Region,
    pub rotation: i32,
    pub pivot: Point,
    pub handles: Vec<OverlayHandle>,
    /// Present only in pan mode; the grip sits above the top edge
    pub rotation_grip: Option<Point>,
}

/// Image-eraser cursor preview, in image-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPreview {
    pub local: Point,
    /// Diameter in stage units
    pub size: f32,
}

/// Everything the compositor needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub image: Option<ImageLayer>,
    /// Image-space drawing strokes: follow the image transform, scaled
    pub image_strokes: Vec<StrokeDraw>,
    /// Stage-space drawing strokes: fixed to the viewport, unscaled
    pub stage_strokes: Vec<StrokeDraw>,
    pub overlay: Option<RegionOverlay>,
    pub cursor: Option<CursorPreview>,
}

fn stroke_color(tool: StrokeTool, color: &Option<String>) -> String {
    match (tool, color) {
        (StrokeTool::Brush, Some(c)) => c.clone(),
        _ => "#000".to_string(),
    }
}

fn stroke_op(tool: StrokeTool) -> CompositeOp {
    match tool {
        StrokeTool::Brush => CompositeOp::SourceOver,
        StrokeTool::Eraser | StrokeTool::ImageEraser => CompositeOp::DestinationOut,
    }
}

impl EditorSession {
    /// Produce the display list for the current live state. `cursor` is the
    /// raw stage-space pointer position, if the host tracks one.
    pub fn compose_frame(&self, cursor: Option<Point>) -> Frame {
        let display_rotation = self.display_rotation();
        let mut frame = Frame::default();

        if let (Some(src), Some(size)) = (self.image_src.clone(), self.img_size) {
            // The clip is the region expressed in image-local coordinates
            let clip = self.region.map(|r| Region {
                x: r.x - self.offset.x,
                y: r.y - self.offset.y,
                w: r.w,
                h: r.h,
            });
            let eraser_strokes = self
                .strokes
                .iter()
                .filter(|s| s.tool == StrokeTool::ImageEraser)
                .map(|s| {
                    let scaled = scale_stroke(s, size);
                    StrokeDraw {
                        points: scaled.points,
                        width: scaled.width,
                        color: "#000".to_string(),
                        op: CompositeOp::DestinationOut,
                    }
                })
                .collect();
            frame.image = Some(ImageLayer {
                src,
                offset: self.offset,
                size,
                rotation: display_rotation,
                clip,
                eraser_strokes,
            });

            // Image-space freeform strokes follow the image and scale with it
            frame.image_strokes = self
                .strokes
                .iter()
                .filter(|s| {
                    s.coordinate_space != CoordinateSpace::Stage
                        && s.tool != StrokeTool::ImageEraser
                })
                .map(|s| {
                    let scaled = scale_stroke(s, size);
                    StrokeDraw {
                        points: scaled.points,
                        width: scaled.width,
                        color: stroke_color(s.tool, &s.color),
                        op: stroke_op(s.tool),
                    }
                })
                .collect();
        }

        // Stage-space strokes are fixed to the viewport: raw points, raw width
        frame.stage_strokes = self
            .strokes
            .iter()
            .filter(|s| {
                s.coordinate_space == CoordinateSpace::Stage && s.tool != StrokeTool::ImageEraser
            })
            .map(|s| StrokeDraw {
                points: s.points.clone(),
                width: s.size,
                color: stroke_color(s.tool, &s.color),
                op: stroke_op(s.tool),
            })
            .collect();

        frame.overlay = self.region_overlay();
        frame.cursor = cursor.and_then(|pos| self.cursor_preview(pos, display_rotation));
        frame
    }

    fn region_overlay(&self) -> Option<RegionOverlay> {
        if !matches!(self.tool, Tool::Pan | Tool::Crop) || !self.show_region_ui {
            return None;
        }
        let region = self.region?;

        if self.tool == Tool::Pan {
            // The overlay rotates with the image about the image center
            self.img_size?;
            let pivot = self.image_center();
            let rotation = self.rotation as f32;
            let handles = handle_positions(&region)
                .into_iter()
                .map(|(handle, anchor)| OverlayHandle {
                    handle,
                    at: rotate_around(anchor, pivot, rotation),
                })
                .collect();
            let grip_base = Point::new(region.x + region.w / 2.0, region.y - ROTATE_HANDLE_OFFSET);
            Some(RegionOverlay {
                region,
                rotation: self.rotation,
                pivot,
                handles,
                rotation_grip: Some(rotate_around(grip_base, pivot, rotation)),
            })
        } else {
            // Crop mode: axis-aligned, resize handles only
            let handles = handle_positions(&region)
                .into_iter()
                .map(|(handle, at)| OverlayHandle { handle, at })
                .collect();
            Some(RegionOverlay {
                region,
                rotation: 0,
                pivot: region.center(),
                handles,
                rotation_grip: None,
            })
        }
    }

    fn cursor_preview(&self, pos: Point, display_rotation: i32) -> Option<CursorPreview> {
        if self.tool != Tool::ImageEraser {
            return None;
        }
        let size = self.img_size?;
        let un = rotate_around(pos, self.image_center(), -(display_rotation as f32));
        let local = Point::new(un.x - self.offset.x, un.y - self.offset.y);
        let inside = local.x >= 0.0 && local.y >= 0.0 && local.x <= size.w && local.y <= size.h;
        inside.then_some(CursorPreview {
            local,
            size: self.image_eraser_size,
        })
    }
}
