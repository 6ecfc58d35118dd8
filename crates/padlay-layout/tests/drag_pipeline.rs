//! End-to-end drag gesture sequences through the touch-event pipeline.

use padlay_core::{Point, PointerId, Rect, TouchEvent};
use padlay_layout::{ControlWidget, LayoutManager, TouchOutcome, WidgetId};
use proptest::prelude::*;

fn manager_with_widget() -> LayoutManager {
    let mut lm = LayoutManager::new(200.0, 200.0).unwrap();
    lm.add_widget(ControlWidget::new("a", Rect::from_size(50.0, 50.0)).unwrap())
        .unwrap();
    lm
}

fn bounds_of(lm: &LayoutManager, id: &str) -> Rect {
    lm.widget(&WidgetId::from(id)).unwrap().bounds()
}

#[test]
fn down_move_up_moves_widget_by_gesture_delta() {
    let mut lm = manager_with_widget();
    let p = PointerId(0);

    let started = lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
    assert_eq!(
        started,
        TouchOutcome::DragStarted {
            widget: WidgetId::from("a")
        }
    );

    lm.handle_touch(TouchEvent::moved(p, Point::new(30.0, 20.0)));
    let committed = lm.handle_touch(TouchEvent::up(p, Point::new(30.0, 20.0)));

    assert_eq!(
        committed,
        TouchOutcome::DragCommitted {
            widget: WidgetId::from("a"),
            bounds: Rect::new(20.0, 10.0, 50.0, 50.0),
        }
    );
    assert_eq!(bounds_of(&lm, "a"), Rect::new(20.0, 10.0, 50.0, 50.0));
}

#[test]
fn drag_out_of_area_clamps_to_edge() {
    let mut lm = manager_with_widget();
    let p = PointerId(0);

    lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
    lm.handle_touch(TouchEvent::moved(p, Point::new(-40.0, -40.0)));
    lm.handle_touch(TouchEvent::up(p, Point::new(-40.0, -40.0)));

    assert_eq!(bounds_of(&lm, "a"), Rect::new(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn cancel_restores_start_bounds() {
    let mut lm = manager_with_widget();
    let p = PointerId(0);

    lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
    lm.handle_touch(TouchEvent::moved(p, Point::new(90.0, 90.0)));
    lm.handle_touch(TouchEvent::moved(p, Point::new(150.0, 40.0)));
    let cancelled = lm.handle_touch(TouchEvent::cancel(p, Point::new(150.0, 40.0)));

    assert_eq!(
        cancelled,
        TouchOutcome::DragCancelled {
            widget: WidgetId::from("a"),
            bounds: Rect::from_size(50.0, 50.0),
        }
    );
    assert_eq!(bounds_of(&lm, "a"), Rect::from_size(50.0, 50.0));
}

#[test]
fn move_count_does_not_change_final_bounds() {
    // Same total delta, dragged once vs. in many steps through the clamp.
    let run = |steps: &[Point]| {
        let mut lm = manager_with_widget();
        let p = PointerId(0);
        lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
        for &pos in steps {
            lm.handle_touch(TouchEvent::moved(p, pos));
        }
        lm.handle_touch(TouchEvent::up(p, Point::new(170.0, 90.0)));
        bounds_of(&lm, "a")
    };

    let direct = run(&[Point::new(170.0, 90.0)]);
    let wandering = run(&[
        Point::new(-200.0, -200.0),
        Point::new(400.0, 400.0),
        Point::new(90.0, 10.0),
        Point::new(170.0, 90.0),
    ]);
    assert_eq!(direct, wandering);
    assert_eq!(direct, Rect::new(150.0, 80.0, 50.0, 50.0));
}

#[test]
fn drag_events_after_commit_are_ignored() {
    let mut lm = manager_with_widget();
    let p = PointerId(0);

    lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
    lm.handle_touch(TouchEvent::up(p, Point::new(10.0, 10.0)));

    let after = lm.handle_touch(TouchEvent::moved(p, Point::new(99.0, 99.0)));
    assert_eq!(after, TouchOutcome::Ignored);
    assert_eq!(lm.handle_touch(TouchEvent::up(p, Point::new(99.0, 99.0))), TouchOutcome::Ignored);
}

#[test]
fn locked_widget_never_starts_a_drag() {
    let mut lm = LayoutManager::new(200.0, 200.0).unwrap();
    lm.add_widget(
        ControlWidget::new("a", Rect::from_size(50.0, 50.0))
            .unwrap()
            .with_locked(true),
    )
    .unwrap();

    let outcome = lm.handle_touch(TouchEvent::down(PointerId(0), Point::new(10.0, 10.0)));
    assert_eq!(outcome, TouchOutcome::Ignored);
}

proptest! {
    // Final bounds depend only on the total delta, never on the path taken.
    #[test]
    fn no_drift_for_arbitrary_move_sequences(
        moves in proptest::collection::vec((-300.0f32..500.0, -300.0f32..500.0), 0..20),
        end_x in -300.0f32..500.0,
        end_y in -300.0f32..500.0,
    ) {
        let mut lm = manager_with_widget();
        let p = PointerId(0);
        let start = Point::new(10.0, 10.0);
        lm.handle_touch(TouchEvent::down(p, start));
        for (x, y) in moves {
            lm.handle_touch(TouchEvent::moved(p, Point::new(x, y)));
        }
        let end = Point::new(end_x, end_y);
        lm.handle_touch(TouchEvent::moved(p, end));
        lm.handle_touch(TouchEvent::up(p, end));

        let delta = end - start;
        let expected = Rect::from_size(50.0, 50.0)
            .translate(delta.x, delta.y)
            .clamp_within(&Rect::from_size(200.0, 200.0));
        prop_assert_eq!(bounds_of(&lm, "a"), expected);
    }

    // Cancel is exact regardless of how far the gesture wandered.
    #[test]
    fn cancel_is_exact_after_any_moves(
        moves in proptest::collection::vec((-300.0f32..500.0, -300.0f32..500.0), 1..20),
    ) {
        let mut lm = manager_with_widget();
        let p = PointerId(0);
        lm.handle_touch(TouchEvent::down(p, Point::new(10.0, 10.0)));
        for (x, y) in &moves {
            lm.handle_touch(TouchEvent::moved(p, Point::new(*x, *y)));
        }
        let (lx, ly) = moves[moves.len() - 1];
        lm.handle_touch(TouchEvent::cancel(p, Point::new(lx, ly)));
        prop_assert_eq!(bounds_of(&lm, "a"), Rect::from_size(50.0, 50.0));
    }
}
