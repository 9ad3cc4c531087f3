//! End-to-end crop workflow: define, commit, placement restore.

use std::time::{Duration, Instant};

use anyhow::bail;
use pixelboard::geometry::{Point, Region, Size};
use pixelboard::raster::{BitmapSource, CropRequest, DecodedBitmap, Rasterizer, SoftwareRasterizer};
use pixelboard::session::{EditorSession, Tool};

use crate::helpers::{TestSessionBuilder, assert_point_eq, assert_size_eq, solid_data_url};

#[test]
fn test_end_to_end_crop_scenario() {
    // 800x600 natural image into a 400-wide viewport fits to 400x300 at 0,0
    let (mut session, now) = TestSessionBuilder::new()
        .with_view(400.0, 400.0)
        .with_image(800, 600)
        .build();
    assert_size_eq(session.img_size().unwrap(), Size::new(400.0, 300.0));
    assert_point_eq(session.offset(), Point::new(0.0, 0.0));

    // Define a fresh region from (50,50) to (350,250)
    session.set_tool(Tool::Crop);
    session.clear_region();
    session.handle_pointer_down(Point::new(50.0, 50.0));
    session.handle_pointer_move(Point::new(350.0, 250.0));
    session.handle_pointer_up();
    assert_eq!(
        session.region(),
        Some(Region { x: 50.0, y: 50.0, w: 300.0, h: 200.0 })
    );

    // Leaving crop commits: the tracked source is replaced
    let src_before = session.image_src().unwrap().to_string();
    session.set_tool(Tool::Pan);
    let cropped_src = session.image_src().unwrap().to_string();
    assert_ne!(cropped_src, src_before);
    assert_eq!(session.region(), None);

    // The new bitmap reports its natural size: placement is restored
    // exactly, with no re-fit to the viewport
    let natural = SoftwareRasterizer.resolve(&cropped_src).unwrap();
    assert_eq!(natural, DecodedBitmap { width: 300, height: 200 });
    session.image_loaded(natural, now);

    assert_point_eq(session.offset(), Point::new(50.0, 50.0));
    assert_size_eq(session.img_size().unwrap(), Size::new(300.0, 200.0));
    assert_eq!(
        session.region(),
        Some(Region { x: 50.0, y: 50.0, w: 300.0, h: 200.0 })
    );
    // Placement restore does not animate
    assert!(!session.is_animating());
}

#[test]
fn test_defining_ignores_out_of_bounds_start_and_clamps_drag() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_view(400.0, 400.0)
        .with_image(800, 600)
        .build();
    session.set_tool(Tool::Crop);
    session.clear_region();

    // Begin outside the image: ignored, no region starts
    session.handle_pointer_down(Point::new(600.0, 600.0));
    assert_eq!(session.region(), None);
    assert!(session.gesture().is_idle());

    // Begin inside, drag far outside: the in-progress gesture clamps
    session.handle_pointer_down(Point::new(100.0, 100.0));
    session.handle_pointer_move(Point::new(9999.0, -50.0));
    assert_eq!(
        session.region(),
        Some(Region { x: 100.0, y: 0.0, w: 300.0, h: 100.0 })
    );
}

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn crop_to_data_url(&self, _request: &CropRequest) -> anyhow::Result<String> {
        bail!("no drawing context")
    }
}

#[test]
fn test_rasterization_failure_aborts_commit_silently() {
    crate::helpers::init_tracing();
    let mut session = EditorSession::with_rasterizer(Box::new(FailingRasterizer));
    session.set_view_size(Size::new(400.0, 400.0));
    let t0 = Instant::now();
    let src = solid_data_url(800, 600, [255, 255, 255, 255]);
    session.create_or_select_object("obj-1", Some(src.clone()));
    session.image_loaded(DecodedBitmap { width: 800, height: 600 }, t0);
    session.tick(t0 + Duration::from_millis(400));

    session.set_tool(Tool::Crop);
    session.handle_pointer_down(Point::new(400.0, 300.0));
    session.handle_pointer_move(Point::new(200.0, 150.0));
    session.handle_pointer_up();
    session.set_tool(Tool::Pan);

    // The commit aborted: prior image and region state are intact
    assert_eq!(session.image_src(), Some(src.as_str()));
    assert_eq!(
        session.region(),
        Some(Region { x: 0.0, y: 0.0, w: 200.0, h: 150.0 })
    );
    assert_size_eq(session.img_size().unwrap(), Size::new(400.0, 300.0));
}

#[test]
fn test_cropped_pixels_match_displayed_placement() {
    // A 100x100 source shown at 100x100; crop the 40x30 area at (10,20)
    crate::helpers::init_tracing();
    let mut session = EditorSession::new();
    session.set_view_size(Size::new(200.0, 200.0));
    let t0 = Instant::now();
    let src = solid_data_url(100, 100, [200, 50, 25, 255]);
    session.create_or_select_object("px", Some(src));
    session.image_loaded(DecodedBitmap { width: 100, height: 100 }, t0);
    session.tick(t0 + Duration::from_millis(400));

    session.set_tool(Tool::Crop);
    session.set_region(Some(Region { x: 10.0, y: 20.0, w: 40.0, h: 30.0 }));
    session.apply_crop();

    let cropped = session.image_src().unwrap();
    let natural = SoftwareRasterizer.resolve(cropped).unwrap();
    assert_eq!(natural, DecodedBitmap { width: 40, height: 30 });
}
