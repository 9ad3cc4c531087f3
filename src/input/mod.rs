//! Pointer input handling for the editor stage.
//!
//! This module implements all pointer interaction logic for the editor,
//! including region definition, handle-based resize, rotation, image moves,
//! and stroke recording.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`GestureState`) to track
//! the current interaction mode. This replaces scattered boolean flags and
//! makes impossible states unrepresentable.
//!
//! ## Modules
//!
//! - `state` - Gesture state machine enum and helper methods
//! - `handles` - Handle/grip placement, hit-testing, resize edge rules
//! - `pointer_down` - Pointer down handling (region init, handle/grip capture)
//! - `pointer_move` - Pointer move handling (drags, rotation, stroke extend)
//! - `pointer_up` - Pointer up handling (finalize gestures, history commits)

pub mod handles;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;

pub use handles::{Handle, HoverTarget, PointerAccuracy};
pub use state::GestureState;
