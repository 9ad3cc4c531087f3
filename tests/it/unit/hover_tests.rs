//! Hover feedback: which handle or grip a pointer position would engage.

use pixelboard::geometry::{Point, rotate_around};
use pixelboard::input::{Handle, HoverTarget};
use pixelboard::session::Tool;

use crate::helpers::TestSessionBuilder;

#[test]
fn test_hover_reports_handles_axis_aligned() {
    let (session, _) = TestSessionBuilder::new().with_image(800, 600).build();

    // Image fits to 500x375, region covers it
    assert_eq!(
        session.hover_target(Point::new(2.0, 3.0)),
        HoverTarget::Handle(Handle::Nw)
    );
    assert_eq!(
        session.hover_target(Point::new(250.0, 150.0)),
        HoverTarget::None
    );
}

#[test]
fn test_hover_follows_rotation_in_pan_mode() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    session.set_rotation(90);

    // The NW corner's on-stage position after rotating about the center
    let center = session.image_center();
    let rotated_nw = rotate_around(Point::new(0.0, 0.0), center, 90.0);
    assert_eq!(
        session.hover_target(rotated_nw),
        HoverTarget::Handle(Handle::Nw)
    );
    // Its un-rotated position no longer hovers anything
    assert_eq!(session.hover_target(Point::new(0.0, 0.0)), HoverTarget::None);
}

#[test]
fn test_hover_rotation_grip_only_in_pan_mode() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    let grip = Point::new(250.0, -32.0);

    assert_eq!(session.hover_target(grip), HoverTarget::RotationGrip);

    session.set_tool(Tool::Crop);
    assert_eq!(session.hover_target(grip), HoverTarget::None);
}

#[test]
fn test_hover_inactive_for_drawing_tools() {
    let (mut session, _) = TestSessionBuilder::new().with_image(800, 600).build();
    session.set_tool(Tool::Brush);

    assert_eq!(session.hover_target(Point::new(2.0, 3.0)), HoverTarget::None);
}
