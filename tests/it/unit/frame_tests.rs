//! Display-list composition: layer separation, clip, overlay, cursor.

use pixelboard::geometry::{Point, Region, Size};
use pixelboard::render::CompositeOp;
use pixelboard::session::Tool;
use pixelboard::strokes::{CoordinateSpace, Stroke, StrokeTool};

use crate::helpers::TestSessionBuilder;

/// A stroke with fixed geometry for composition tests.
fn stroke(
    tool: StrokeTool,
    space: CoordinateSpace,
    points: &[(f32, f32)],
    size: f32,
    base: Option<Size>,
) -> Stroke {
    let color = (tool == StrokeTool::Brush).then(|| "#00ff00".to_string());
    let first = Point::new(points[0].0, points[0].1);
    let mut stroke = Stroke::begin(tool, color, size, first, base, space);
    for &(x, y) in &points[1..] {
        stroke.points.push(Point::new(x, y));
    }
    stroke
}

#[test]
fn test_stroke_layer_separation() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    let img = session.img_size();
    session.set_strokes(vec![
        stroke(StrokeTool::Brush, CoordinateSpace::Stage, &[(1.0, 1.0)], 8.0, img),
        stroke(StrokeTool::Eraser, CoordinateSpace::Stage, &[(2.0, 2.0)], 24.0, img),
        stroke(StrokeTool::Brush, CoordinateSpace::Image, &[(3.0, 3.0)], 8.0, img),
        stroke(StrokeTool::ImageEraser, CoordinateSpace::Image, &[(4.0, 4.0)], 48.0, img),
    ]);

    let frame = session.compose_frame(None);

    let image = frame.image.expect("image layer");
    // The image eraser punches out of the image layer only
    assert_eq!(image.eraser_strokes.len(), 1);
    assert_eq!(image.eraser_strokes[0].op, CompositeOp::DestinationOut);

    // Image-space freeform strokes follow the image
    assert_eq!(frame.image_strokes.len(), 1);
    assert_eq!(frame.image_strokes[0].op, CompositeOp::SourceOver);
    assert_eq!(frame.image_strokes[0].color, "#00ff00");

    // Stage strokes stay fixed to the viewport; the freeform eraser lives
    // here, subtractive, never touching the image layer
    assert_eq!(frame.stage_strokes.len(), 2);
    assert_eq!(frame.stage_strokes[0].op, CompositeOp::SourceOver);
    assert_eq!(frame.stage_strokes[1].op, CompositeOp::DestinationOut);
    assert_eq!(frame.stage_strokes[1].color, "#000");
}

#[test]
fn test_image_space_strokes_rescale_with_image() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    // Drawn when the image was 500x375
    session.set_strokes(vec![stroke(
        StrokeTool::ImageEraser,
        CoordinateSpace::Image,
        &[(100.0, 100.0)],
        48.0,
        Some(Size::new(500.0, 375.0)),
    )]);

    // Image shrinks to half size; the stroke tracks it
    session.set_img_size(Some(Size::new(250.0, 187.5)));
    let frame = session.compose_frame(None);

    let image = frame.image.expect("image layer");
    assert_eq!(image.eraser_strokes[0].points, vec![Point::new(50.0, 50.0)]);
    assert_eq!(image.eraser_strokes[0].width, 24.0);
}

#[test]
fn test_stage_strokes_do_not_rescale() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    session.set_strokes(vec![stroke(
        StrokeTool::Brush,
        CoordinateSpace::Stage,
        &[(100.0, 100.0)],
        8.0,
        Some(Size::new(500.0, 375.0)),
    )]);

    session.set_img_size(Some(Size::new(250.0, 187.5)));
    let frame = session.compose_frame(None);

    assert_eq!(frame.stage_strokes[0].points, vec![Point::new(100.0, 100.0)]);
    assert_eq!(frame.stage_strokes[0].width, 8.0);
}

#[test]
fn test_clip_is_region_in_image_local_coordinates() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    session.set_offset(Point::new(40.0, 30.0));
    session.set_region(Some(Region { x: 90.0, y: 80.0, w: 100.0, h: 60.0 }));

    let frame = session.compose_frame(None);

    assert_eq!(
        frame.image.unwrap().clip,
        Some(Region { x: 50.0, y: 50.0, w: 100.0, h: 60.0 })
    );
}

#[test]
fn test_overlay_has_grip_in_pan_mode_only() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();

    let overlay = session.compose_frame(None).overlay.expect("pan overlay");
    assert!(overlay.rotation_grip.is_some());
    assert_eq!(overlay.handles.len(), 8);

    session.set_tool(Tool::Crop);
    let overlay = session.compose_frame(None).overlay.expect("crop overlay");
    assert!(overlay.rotation_grip.is_none());
    assert_eq!(overlay.rotation, 0);
}

#[test]
fn test_cursor_preview_only_inside_image_with_image_eraser() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();

    // Pan mode: no preview
    assert!(session.compose_frame(Some(Point::new(100.0, 100.0))).cursor.is_none());

    session.set_tool(Tool::ImageEraser);
    let cursor = session
        .compose_frame(Some(Point::new(100.0, 100.0)))
        .cursor
        .expect("cursor preview");
    assert_eq!(cursor.local, Point::new(100.0, 100.0));
    assert_eq!(cursor.size, 48.0);

    // Outside the image bounds: no preview
    assert!(session.compose_frame(Some(Point::new(900.0, 100.0))).cursor.is_none());
}
