//! Snapshot tests using the insta crate.
//!
//! These pin the serialized wire shape of the model types: snapshots and
//! mods round-trip through serde, so field names and enum tags are part of
//! the public surface.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use pixelboard::filters::{FilterToggles, FiltersState};
use pixelboard::geometry::{Point, Region, Size};
use pixelboard::history::Snapshot;
use pixelboard::strokes::{CoordinateSpace, Stroke, StrokeTool};

#[test]
fn snapshot_region_serialization() {
    let region = Region { x: 10.0, y: 20.0, w: 300.0, h: 200.0 };
    insta::assert_json_snapshot!(region, @r#"
    {
      "x": 10.0,
      "y": 20.0,
      "w": 300.0,
      "h": 200.0
    }
    "#);
}

#[test]
fn snapshot_filter_toggles_default() {
    insta::assert_json_snapshot!(FilterToggles::default(), @r#"
    {
      "blur": false,
      "brighten": false,
      "brightness": false,
      "contrast": false,
      "emboss": false,
      "enhance": false,
      "grayscale": false,
      "hsl": false,
      "hsv": false,
      "invert": false,
      "noise": false,
      "pixelate": false,
      "posterize": false,
      "rgb": false,
      "rgba": false,
      "sepia": false,
      "solarize": false,
      "threshold": false,
      "mask": false
    }
    "#);
}

#[test]
fn snapshot_stroke_serialization() {
    let stroke = Stroke::begin(
        StrokeTool::ImageEraser,
        None,
        48.0,
        Point::new(10.0, 20.0),
        Some(Size::new(400.0, 300.0)),
        CoordinateSpace::Image,
    );
    insta::assert_json_snapshot!(stroke, { ".id" => "[uuid]" }, @r#"
    {
      "id": "[uuid]",
      "tool": "image-eraser",
      "color": null,
      "size": 48.0,
      "points": [
        {
          "x": 10.0,
          "y": 20.0
        }
      ],
      "base_size": {
        "w": 400.0,
        "h": 300.0
      },
      "coordinate_space": "image"
    }
    "#);
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let snapshot = Snapshot {
        src: Some("data:image/png;base64,AAAA".into()),
        offset: Point::new(50.0, 40.0),
        img_size: Some(Size::new(300.0, 200.0)),
        crop: Some(Region { x: 10.0, y: 10.0, w: 80.0, h: 60.0 }),
        rotation: 405,
        filters: FiltersState::default(),
        strokes: vec![Stroke::begin(
            StrokeTool::Brush,
            Some("#ff0000".into()),
            8.0,
            Point::new(1.0, 2.0),
            Some(Size::new(300.0, 200.0)),
            CoordinateSpace::Stage,
        )],
    };

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn snapshot_enum_wire_tags() {
    insta::assert_json_snapshot!(StrokeTool::Brush, @r#""brush""#);
    insta::assert_json_snapshot!(StrokeTool::ImageEraser, @r#""image-eraser""#);
    insta::assert_json_snapshot!(CoordinateSpace::Stage, @r#""stage""#);
    insta::assert_json_snapshot!(CoordinateSpace::Image, @r#""image""#);
}
