//! Gesture state machine - unified state management for pointer interactions.
//!
//! A single explicit state machine replaces scattered drag/rotate/draw flags,
//! making impossible states unrepresentable and giving pointer-up one place
//! to clear transient interaction state.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> DefiningRegion   (pointer down in crop mode, no region yet)
//! Idle -> ResizingHandle   (pointer down on a resize handle)
//! Idle -> Rotating         (pointer down on the rotation grip, pan mode)
//! Idle -> MovingImage      (pointer down inside an existing region, pan mode)
//! Idle -> Drawing          (pointer down with a drawing tool)
//!
//! Any -> Idle              (pointer up or cancel - finalizes the gesture)
//! ```

use crate::geometry::Point;
use crate::input::handles::Handle;
use crate::strokes::StrokeTool;

/// Unified gesture state for all pointer interactions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No active pointer operation
    #[default]
    Idle,

    /// Dragging out a brand-new region in crop mode
    DefiningRegion {
        /// Clamped pointer-down position the region grows from
        anchor: Point,
    },

    /// Dragging one of the eight resize handles
    ResizingHandle {
        /// Which handle is active
        handle: Handle,
        /// Rotation center captured at pointer-down, used to un-rotate
        /// subsequent pointer positions in pan mode
        center: Point,
    },

    /// Dragging the rotation grip
    Rotating {
        /// Pointer angle from the region center at pointer-down, degrees
        start_angle: f32,
        /// Rotation value at pointer-down
        start_rotation: i32,
    },

    /// Dragging the image (and its region) around the stage in pan mode
    MovingImage {
        /// Last pointer position for delta calculation
        last: Point,
    },

    /// Recording a paint/erase stroke
    Drawing {
        /// Tool the stroke was started with
        tool: StrokeTool,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_defining(&self) -> bool {
        matches!(self, Self::DefiningRegion { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingHandle { .. })
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, Self::Rotating { .. })
    }

    pub fn is_moving_image(&self) -> bool {
        matches!(self, Self::MovingImage { .. })
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Get the active resize handle, if resizing
    pub fn active_handle(&self) -> Option<Handle> {
        match self {
            Self::ResizingHandle { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    /// Get the stroke tool, if drawing
    pub fn drawing_tool(&self) -> Option<StrokeTool> {
        match self {
            Self::Drawing { tool } => Some(*tool),
            _ => None,
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Update the last pointer position while moving the image
    pub fn update_moving_last(&mut self, pos: Point) {
        if let Self::MovingImage { last } = self {
            *last = pos;
        }
    }
}
