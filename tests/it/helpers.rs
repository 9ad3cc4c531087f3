//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSessionBuilder` - Builder pattern for sessions with a loaded image
//! - `solid_data_url()` - Encoded single-color bitmaps for image fixtures
//! - Float-tolerant assertion helpers

use std::sync::Once;
use std::time::{Duration, Instant};

use image::{Rgba, RgbaImage};
use pixelboard::geometry::{Point, Size};
use pixelboard::raster::{DecodedBitmap, SoftwareRasterizer};
use pixelboard::session::EditorSession;

/// Install a tracing subscriber once for the whole test binary, honoring
/// `RUST_LOG` for verbosity.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Encode a solid-color bitmap as a PNG data URL.
pub fn solid_data_url(w: u32, h: u32, rgba: [u8; 4]) -> String {
    let img = RgbaImage::from_pixel(w, h, Rgba(rgba));
    SoftwareRasterizer::encode_data_url(&img).expect("encode test bitmap")
}

pub fn assert_point_eq(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
        "expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_size_eq(actual: Size, expected: Size) {
    assert!(
        (actual.w - expected.w).abs() < 1e-3 && (actual.h - expected.h).abs() < 1e-3,
        "expected {expected:?}, got {actual:?}"
    );
}

// ============================================================================
// TestSessionBuilder - Builder pattern for creating test sessions
// ============================================================================

/// Builder for sessions with a viewport and an optionally loaded image.
///
/// # Example
/// ```ignore
/// let (mut session, now) = TestSessionBuilder::new()
///     .with_view(400.0, 400.0)
///     .with_image(800, 600)
///     .build();
/// ```
pub struct TestSessionBuilder {
    view: (f32, f32),
    image: Option<(u32, u32)>,
    object_id: String,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    pub fn new() -> Self {
        Self {
            view: (500.0, 500.0),
            image: None,
            object_id: "obj-1".to_string(),
        }
    }

    pub fn with_view(mut self, w: f32, h: f32) -> Self {
        self.view = (w, h);
        self
    }

    /// Upload and fully load a solid white image of the given natural size.
    pub fn with_image(mut self, w: u32, h: u32) -> Self {
        self.image = Some((w, h));
        self
    }

    pub fn with_object_id(mut self, id: &str) -> Self {
        self.object_id = id.to_string();
        self
    }

    /// Build the session. Returns the session together with the clock value
    /// after the image fit animation has settled, for use in further
    /// `tick`/`set_filters` calls.
    pub fn build(self) -> (EditorSession, Instant) {
        init_tracing();
        let mut session = EditorSession::new();
        session.set_view_size(Size::new(self.view.0, self.view.1));

        let t0 = Instant::now();
        let Some((w, h)) = self.image else {
            return (session, t0);
        };

        let src = solid_data_url(w, h, [255, 255, 255, 255]);
        session.create_or_select_object(&self.object_id, Some(src));
        session.image_loaded(DecodedBitmap { width: w, height: h }, t0);

        // Let the eased fit animation run to completion
        let settled = t0 + Duration::from_millis(400);
        session.tick(settled);
        assert!(!session.is_animating());
        (session, settled)
    }
}

/// Load another image into the session as a new object, settling the fit.
pub fn load_second_object(
    session: &mut EditorSession,
    id: &str,
    w: u32,
    h: u32,
    now: Instant,
) -> Instant {
    let src = solid_data_url(w, h, [0, 0, 0, 255]);
    session.create_or_select_object(id, Some(src));
    session.image_loaded(DecodedBitmap { width: w, height: h }, now);
    let settled = now + Duration::from_millis(400);
    session.tick(settled);
    settled
}
