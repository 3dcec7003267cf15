use std::sync::Arc;

use qreveal_code::extract;
use qreveal_scene::{
    DEFAULT_OFFSET_SCALE, GeometryLayout, PaintUpdate, QrCodeItem, RevealParams, dot_progress,
};

fn layout() -> GeometryLayout {
    GeometryLayout { origin: [0.0, 0.0], width: 460.0 }
}

#[test]
fn letter_a_reveals_from_rest_to_gone() {
    let code = extract("A");
    assert_eq!(code.width, 21);
    let params = RevealParams::default();
    for dot in &code.dots {
        let start = params.pose(dot.surround_count, 0.0);
        assert_eq!((start.offset_y, start.opacity), (0.0, 1.0));
        let end = params.pose(dot.surround_count, 1.0);
        assert_eq!((end.offset_y, end.opacity), (DEFAULT_OFFSET_SCALE, 0.0));
    }
}

#[test]
fn finder_pattern_edges_settle_before_their_cores() {
    let code = extract("A");
    let sparsest = code.dots.iter().map(|d| d.surround_count).min().unwrap();
    let densest = code.dots.iter().map(|d| d.surround_count).max().unwrap();
    assert!(sparsest < densest);
    for step in 0..=20 {
        let p = step as f32 / 20.0;
        assert!(dot_progress(sparsest, p) >= dot_progress(densest, p));
    }
}

#[test]
fn animation_frames_never_touch_the_code() {
    let mut item = QrCodeItem::new();
    item.set_text("https://example.com");
    assert_eq!(item.update_paint(layout()), PaintUpdate::Rebuilt);

    let code = item.code().clone();
    let snapshot = (*code).clone();
    let vertices = item.geometry().unwrap().vertices().as_ptr();

    for step in 1..=50 {
        item.set_reveal_progress(step as f32 / 50.0);
        assert_eq!(item.update_paint(layout()), PaintUpdate::Animated);
    }

    assert!(Arc::ptr_eq(item.code(), &code));
    assert_eq!(**item.code(), snapshot);
    assert_eq!(item.geometry().unwrap().vertices().as_ptr(), vertices);
}

mod reveal_proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn progress_changes_keep_code_identity(
            text in "[ -~]{1,60}",
            steps in proptest::collection::vec(0.0f32..=1.0, 1..16),
        ) {
            let mut item = QrCodeItem::new();
            item.set_text(&text);
            item.update_paint(layout());
            let before = (**item.code()).clone();
            let vertex_count = item.geometry().unwrap().vertices().len();

            for p in steps {
                item.set_reveal_progress(p);
                prop_assert_ne!(item.update_paint(layout()), PaintUpdate::Rebuilt);
            }

            prop_assert_eq!(&**item.code(), &before);
            prop_assert_eq!(item.geometry().unwrap().vertices().len(), vertex_count);
        }
    }
}
