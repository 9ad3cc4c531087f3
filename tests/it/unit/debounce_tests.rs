//! Debounced filter-change history commits.

use std::time::{Duration, Instant};

use pixelboard::filters::FiltersState;
use pixelboard::geometry::Size;
use pixelboard::session::EditorSession;

use crate::helpers::TestSessionBuilder;

fn blurred(radius: f32) -> FiltersState {
    let mut f = FiltersState::default();
    f.enabled.blur = true;
    f.blur_radius = radius;
    f
}

#[test]
fn test_slider_drag_coalesces_into_one_entry() {
    let (mut session, t0) = TestSessionBuilder::new().with_image(400, 300).build();
    let pushes = session.history().past_len();

    // Three changes inside the window, then the window elapses
    session.set_filters(blurred(1.0), t0);
    session.tick(t0 + Duration::from_millis(100));
    session.set_filters(blurred(2.0), t0 + Duration::from_millis(100));
    session.tick(t0 + Duration::from_millis(200));
    session.set_filters(blurred(3.0), t0 + Duration::from_millis(200));
    session.tick(t0 + Duration::from_millis(300));
    assert_eq!(session.history().past_len(), pushes);

    session.tick(t0 + Duration::from_millis(500));
    assert_eq!(session.history().past_len(), pushes + 1);
    assert_eq!(session.history().present().filters, blurred(3.0));

    // Nothing further fires
    session.tick(t0 + Duration::from_millis(1000));
    assert_eq!(session.history().past_len(), pushes + 1);
}

#[test]
fn test_no_commit_without_an_image() {
    crate::helpers::init_tracing();
    let mut session = EditorSession::new();
    session.set_view_size(Size::new(500.0, 500.0));

    let t0 = Instant::now();
    session.set_filters(blurred(4.0), t0);
    session.tick(t0 + Duration::from_millis(500));

    assert_eq!(session.history().past_len(), 0);
    assert_eq!(session.filters().blur_radius, 4.0);
}

#[test]
fn test_undo_cancels_pending_commit() {
    let (mut session, t0) = TestSessionBuilder::new().with_image(400, 300).build();
    let pushes = session.history().past_len();

    session.set_filters(blurred(5.0), t0);
    assert!(session.undo());

    session.tick(t0 + Duration::from_millis(500));
    // The undo consumed one entry and no filter commit landed afterwards
    assert_eq!(session.history().past_len(), pushes - 1);
    assert_eq!(session.filters(), &FiltersState::default());
}
