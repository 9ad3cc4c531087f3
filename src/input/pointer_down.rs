//! Pointer down handling - stroke begin, region init, handle/grip capture.
//!
//! ## Performance Notes
//!
//! Pointer down is a hot path during user interaction. The hit set is
//! constant-size (8 handles + 1 grip), so detection is a fixed number of
//! squared-distance tests; no spatial index is needed.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use tracing::trace;

use crate::geometry::{Point, Region, clamp_point, rotate_around};
use crate::input::handles::{handle_positions, hit_circle, rotation_grip_position};
use crate::input::state::GestureState;
use crate::profile_scope;
use crate::session::{EditorSession, Tool};
use crate::strokes::{CoordinateSpace, Stroke, StrokeTool};

impl EditorSession {
    pub fn handle_pointer_down(&mut self, pos: Point) {
        profile_scope!("handle_pointer_down");

        let had_region = self.region.is_some();

        // Drawing tools take priority over selection handling
        if let Some(stroke_tool) = self.tool.stroke_tool() {
            self.begin_stroke(stroke_tool, pos);
            return;
        }

        if self.tool == Tool::Crop {
            let Some(bounds) = self.image_bounds() else {
                return;
            };
            if self.region.is_none() {
                // Starting a fresh region requires the anchor inside the image
                if !bounds.contains(pos) {
                    return;
                }
                let anchor = clamp_point(pos, bounds);
                self.set_region(Some(Region { x: anchor.x, y: anchor.y, w: 0.0, h: 0.0 }));
                self.gesture = GestureState::DefiningRegion { anchor };
                self.show_region_ui = true;
                return;
            }
        } else {
            // Pan mode: initialize the selection on image click if none exists
            let inside_image = self.image_bounds().is_some_and(|b| b.contains(pos));
            if self.region.is_none() {
                match self.img_size {
                    Some(size) if inside_image => {
                        self.set_region(Some(Region {
                            x: self.offset.x,
                            y: self.offset.y,
                            w: size.w,
                            h: size.h,
                        }));
                        self.show_region_ui = true;
                    }
                    _ => {
                        self.show_region_ui = false;
                        return;
                    }
                }
            }
        }

        // Hit-testing runs against the region as it stood before this click;
        // a region created just above only shows the selection lines.
        if let Some(region) = self.region.filter(|_| had_region) {
            let handle_radius = self.pointer_accuracy.handle_radius();
            let rotate_radius = self.pointer_accuracy.rotate_radius();

            if self.tool == Tool::Pan {
                let center = self.image_center();
                let rotation = self.rotation as f32;

                // The rotation grip sits outside the region, so it must be
                // tested before the inside-region gate. It rotates with the
                // image about the image center.
                let grip = rotate_around(rotation_grip_position(&region), center, rotation);
                if hit_circle(grip, pos, rotate_radius) {
                    let c = region.center();
                    let start_angle = (pos.y - c.y).atan2(pos.x - c.x).to_degrees();
                    trace!(start_angle, "Rotation grip captured");
                    self.gesture = GestureState::Rotating {
                        start_angle,
                        start_rotation: self.rotation,
                    };
                    self.show_region_ui = true;
                    return;
                }

                // Resize handles also rotate with the image and may lie
                // outside the axis-aligned region; test them before gating.
                for (handle, anchor) in handle_positions(&region) {
                    let at = rotate_around(anchor, center, rotation);
                    if hit_circle(at, pos, handle_radius) {
                        trace!(?handle, "Resize handle captured");
                        self.gesture = GestureState::ResizingHandle { handle, center };
                        self.show_region_ui = true;
                        return;
                    }
                }
            }

            // Inside-region test: un-rotate the pointer only in pan mode;
            // the crop overlay stays axis-aligned.
            let inside_region = if self.tool == Tool::Pan {
                let un = rotate_around(pos, self.image_center(), -(self.rotation as f32));
                region.contains(un)
            } else {
                region.contains(pos)
            };

            if !inside_region {
                if self.tool == Tool::Crop {
                    self.show_region_ui = false;
                } else {
                    let inside_image = self.image_bounds().is_some_and(|b| b.contains(pos));
                    if !inside_image {
                        self.show_region_ui = false;
                    }
                }
                return;
            }

            if !self.show_region_ui {
                self.show_region_ui = true;
                return;
            }

            // Crop mode only exposes the resize handles, and only once the
            // pointer is confirmed inside the rectangle
            if self.tool == Tool::Crop {
                if let Some(handle) = crate::input::handles::hit_handle(&region, pos, handle_radius)
                {
                    trace!(?handle, "Resize handle captured");
                    self.gesture = GestureState::ResizingHandle {
                        handle,
                        center: self.image_center(),
                    };
                    return;
                }
            }
        }

        // Inside the region, not on a handle
        self.show_region_ui = true;
        if self.tool != Tool::Crop && had_region {
            // A region created by this very click only shows the selection;
            // an existing one starts an image move
            self.gesture = GestureState::MovingImage { last: pos };
        }
    }

    /// Begin recording a stroke at a raw stage-space pointer position.
    pub(crate) fn begin_stroke(&mut self, tool: StrokeTool, pos: Point) {
        let (local, coordinate_space) = if tool == StrokeTool::ImageEraser {
            // The image eraser works on the image itself: it needs an image,
            // an in-bounds start, and image-space points
            let Some(bounds) = self.image_bounds() else {
                return;
            };
            if !bounds.contains(pos) {
                return;
            }
            let center = self.image_center();
            let un = rotate_around(pos, center, -(self.display_rotation() as f32));
            (
                Point::new(un.x - self.offset.x, un.y - self.offset.y),
                CoordinateSpace::Image,
            )
        } else {
            (pos, CoordinateSpace::Stage)
        };

        let size = match tool {
            StrokeTool::Brush => self.brush_size,
            StrokeTool::Eraser => self.eraser_size,
            StrokeTool::ImageEraser => self.image_eraser_size,
        };
        let color = (tool == StrokeTool::Brush).then(|| self.brush_color.clone());

        let stroke = Stroke::begin(tool, color, size, local, self.img_size, coordinate_space);
        self.push_stroke(stroke);
        self.gesture = GestureState::Drawing { tool };
    }
}
