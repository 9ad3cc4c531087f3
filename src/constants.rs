//! Editor-wide constants.
//!
//! Centralizes magic numbers for interaction geometry, timing, and tool
//! defaults to make the codebase more maintainable and self-documenting.

// ============================================================================
// Handle & Grip Hit-Testing
// ============================================================================

/// Hit radius for resize handles with a fine (mouse) pointer
pub const HANDLE_HIT_RADIUS: f32 = 16.0;

/// Hit radius for resize handles with a coarse (touch) pointer
pub const COARSE_HANDLE_HIT_RADIUS: f32 = 24.0;

/// Hit radius for the rotation grip with a fine pointer
pub const ROTATE_HIT_RADIUS: f32 = 18.0;

/// Hit radius for the rotation grip with a coarse pointer
pub const COARSE_ROTATE_HIT_RADIUS: f32 = 28.0;

/// Distance of the rotation grip above the region's top-center
pub const ROTATE_HANDLE_OFFSET: f32 = 32.0;

/// Visual radius of handle circles in the overlay
pub const HANDLE_VISUAL_RADIUS: f32 = 6.0;

// ============================================================================
// Region Geometry
// ============================================================================

/// Minimum region edge length; edge drags clamp here instead of inverting
pub const MIN_REGION_SIZE: f32 = 1.0;

// ============================================================================
// History & Timing
// ============================================================================

/// Maximum snapshots retained in the past stack; pushing beyond evicts oldest
pub const MAX_HISTORY: usize = 500;

/// Debounce window for coalescing continuous filter edits into one snapshot
pub const FILTER_DEBOUNCE_MS: u64 = 250;

/// Duration of the eased image-fit resize animation
pub const RESIZE_ANIMATION_MS: u64 = 300;

// ============================================================================
// Viewport & Tool Defaults
// ============================================================================

/// Default stage size before any image is loaded
pub const DEFAULT_VIEW_SIZE: (f32, f32) = (500.0, 500.0);

/// Default brush color (hex)
pub const DEFAULT_BRUSH_COLOR: &str = "#ff0000";

/// Default brush diameter in stage units
pub const DEFAULT_BRUSH_SIZE: f32 = 8.0;

/// Default eraser diameter in stage units
pub const DEFAULT_ERASER_SIZE: f32 = 24.0;

/// Default image-eraser diameter in stage units
pub const DEFAULT_IMAGE_ERASER_SIZE: f32 = 48.0;
