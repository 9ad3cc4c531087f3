//! Pixelboard - the geometric transform and editing-history engine of an
//! interactive raster-image editor.
//!
//! The engine owns coordinate-space math, the handle-based interaction state
//! machine behind crop/pan/resize/rotate, stroke recording in stage or image
//! space, snapshot-based linear undo/redo, and per-object edit state. It
//! never draws: rendering, filter pixel processing, and upload plumbing are
//! external collaborators that consume the state this crate produces.

pub mod animation;
pub mod constants;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod history;
pub mod input;
pub mod perf;
pub mod raster;
pub mod render;
pub mod session;
pub mod strokes;

pub use error::{EditorError, EditorResult};
pub use filters::FiltersState;
pub use geometry::{Bounds, DragRect, Point, Region, Size};
pub use history::{Snapshot, SnapshotHistory};
pub use input::{GestureState, Handle, HoverTarget, PointerAccuracy};
pub use render::Frame;
pub use session::{EditorSession, Tool};
pub use strokes::{CoordinateSpace, Stroke, StrokeTool};
