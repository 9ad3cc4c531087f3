//! Pointer up handling - finalize gestures, produce history commits.
//!
//! Pointer-up always clears the in-progress gesture state before evaluating
//! commit logic, so a release can never leave a stuck drag behind.

use crate::geometry::{Point, Size};
use crate::profile_scope;
use crate::session::{EditorSession, Tool};

impl EditorSession {
    pub fn handle_pointer_up(&mut self) {
        profile_scope!("handle_pointer_up");

        if self.tool.stroke_tool().is_some() {
            self.gesture.reset();
            if self.tool == Tool::ImageEraser && self.img_size.is_none() {
                return;
            }
            let snapshot = self.snapshot_live();
            self.push_snapshot(snapshot);
            return;
        }

        let was_resizing = self.gesture.is_resizing();
        let was_rotating = self.gesture.is_rotating();
        let was_moving = self.gesture.is_moving_image();
        self.gesture.reset();

        if self.tool == Tool::Pan {
            if was_resizing {
                if let Some(region) = self.region {
                    // Commit offset/size/region together as one change
                    self.set_offset(Point::new(region.x, region.y));
                    self.set_img_size(Some(Size::new(region.w, region.h)));
                    self.set_region(Some(region));
                    let snapshot = self.snapshot_live();
                    self.push_snapshot(snapshot);
                }
            }
            if was_rotating || was_moving {
                let snapshot = self.snapshot_live();
                self.push_snapshot(snapshot);
            }
            return;
        }

        if self.tool == Tool::Crop {
            let snapshot = self.snapshot_live();
            self.push_snapshot(snapshot);
        }
    }

    /// Pointer cancellation (touch-cancel, pointer leaving the stage with
    /// the button released elsewhere): clear transient interaction state
    /// without committing anything.
    pub fn handle_pointer_cancel(&mut self) {
        self.gesture.reset();
    }
}
