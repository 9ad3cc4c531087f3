//! Pointer move handling - drags, rotation, stroke extension, hover.
//!
//! ## Performance Notes
//!
//! Pointer move can fire 60+ times per second during a drag. Key
//! optimizations:
//! - Early exit via the gesture state machine
//! - Minimal state updates per move
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::geometry::{Bounds, Point, Region, clamp, clamp_point, rotate_around};
use crate::input::handles::{
    Handle, HoverTarget, hit_circle, hit_handle, resize_region, rotation_grip_position,
};
use crate::input::state::GestureState;
use crate::profile_scope;
use crate::session::{EditorSession, Tool};
use crate::strokes::StrokeTool;

impl EditorSession {
    pub fn handle_pointer_move(&mut self, pos: Point) {
        profile_scope!("handle_pointer_move");

        match self.gesture {
            GestureState::Drawing { tool } => self.extend_stroke(tool, pos),
            GestureState::Rotating { start_angle, start_rotation } => {
                self.rotate_to(pos, start_angle, start_rotation);
            }
            GestureState::ResizingHandle { handle, center } => {
                self.resize_to(pos, handle, center);
            }
            GestureState::DefiningRegion { anchor } => {
                let Some(bounds) = self.image_bounds() else {
                    return;
                };
                let p = clamp_point(pos, bounds);
                self.set_region(Some(Region::from_corners(anchor, p)));
            }
            GestureState::MovingImage { last } => {
                let dx = pos.x - last.x;
                let dy = pos.y - last.y;
                self.set_offset(Point::new(self.offset.x + dx, self.offset.y + dy));
                // The region travels with the image instead of resetting
                if let Some(region) = self.region {
                    self.set_region(Some(region.translated(dx, dy)));
                }
                self.gesture.update_moving_last(pos);
            }
            GestureState::Idle => {}
        }
    }

    /// What the pointer would interact with, for cursor feedback. Pan mode
    /// probes the rotated overlay; crop mode probes axis-aligned.
    pub fn hover_target(&self, pos: Point) -> HoverTarget {
        if !matches!(self.tool, Tool::Pan | Tool::Crop) {
            return HoverTarget::None;
        }
        let (Some(region), Some(_)) = (self.region, self.image_bounds()) else {
            return HoverTarget::None;
        };

        let probe = if self.tool == Tool::Pan {
            rotate_around(pos, self.image_center(), -(self.rotation as f32))
        } else {
            pos
        };
        if let Some(handle) = hit_handle(&region, probe, self.pointer_accuracy.handle_radius()) {
            return HoverTarget::Handle(handle);
        }

        if self.tool == Tool::Pan {
            let grip = rotate_around(
                rotation_grip_position(&region),
                self.image_center(),
                self.rotation as f32,
            );
            if hit_circle(grip, pos, self.pointer_accuracy.rotate_radius()) {
                return HoverTarget::RotationGrip;
            }
        }
        HoverTarget::None
    }

    fn extend_stroke(&mut self, tool: StrokeTool, pos: Point) {
        let local = if tool == StrokeTool::ImageEraser {
            let Some(bounds) = self.image_bounds() else {
                return;
            };
            // Mid-stroke points outside the image are dropped, not clamped;
            // the stroke resumes when the pointer re-enters
            if !bounds.contains(pos) {
                return;
            }
            let center = self.image_center();
            let un = rotate_around(pos, center, -(self.display_rotation() as f32));
            Point::new(un.x - self.offset.x, un.y - self.offset.y)
        } else {
            pos
        };
        self.extend_last_stroke(local);
    }

    fn rotate_to(&mut self, pos: Point, start_angle: f32, start_rotation: i32) {
        let Some(region) = self.region else {
            return;
        };
        let c = region.center();
        let angle = (pos.y - c.y).atan2(pos.x - c.x).to_degrees();
        // Snap to whole degrees
        let next = start_rotation as f32 + (angle - start_angle);
        self.set_rotation(next.round() as i32);
    }

    fn resize_to(&mut self, pos: Point, handle: Handle, center: Point) {
        let Some(region) = self.region else {
            return;
        };

        let (bounds, p) = if self.tool == Tool::Crop {
            // Crop mode: clamp the pointer and the region to the image
            let Some(bounds) = self.image_bounds() else {
                return;
            };
            (bounds, clamp_point(pos, bounds))
        } else {
            // Pan mode: un-rotate about the captured center, clamp to stage
            let stage = Bounds::from_stage(self.view_size);
            let un = rotate_around(pos, center, -(self.rotation as f32));
            (
                stage,
                Point::new(
                    clamp(un.x, 0.0, self.view_size.w),
                    clamp(un.y, 0.0, self.view_size.h),
                ),
            )
        };

        let next = resize_region(&region, handle, p, bounds);
        if self.tool == Tool::Pan {
            // Live resize: the image follows its selection during the drag,
            // not after commit
            self.set_offset(Point::new(next.x, next.y));
            self.set_img_size(Some(crate::geometry::Size::new(next.w, next.h)));
        }
        self.set_region(Some(next));
    }
}
