//! Integration tests for the stepping model: wrap, hover, and gating.

use autoscroll_core::animation::{AnimationDriver, DriverPhase, Motion, OffsetState, step};
use autoscroll_core::geometry::{Geometry, RowMetrics};
use autoscroll_core::interaction::{DEFAULT_RESUME_DELAY, InteractionState};
use proptest::prelude::*;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn geometry() -> Geometry {
    Geometry::from_rows(&RowMetrics::uniform(5, 40.0, 8.0), 3)
}

#[test]
fn offset_increases_and_stays_in_range() {
    let g = geometry();
    let mut d = AnimationDriver::new(Motion::new(30.0, 5, false));
    let i = InteractionState::new();
    let mut now = Duration::from_secs(1);
    let mut prev = d.on_frame(now, &g, &i).offset;
    for _ in 0..120 {
        now += FRAME;
        let next = d.on_frame(now, &g, &i).offset;
        assert!(next > prev, "offset should strictly increase: {prev} -> {next}");
        assert!((0.0..g.one_copy_height).contains(&next));
        prev = next;
    }
}

#[test]
fn ten_minute_gap_keeps_wrap_invariant() {
    let g = geometry();
    let mut d = AnimationDriver::new(Motion::new(30.0, 5, false));
    let i = InteractionState::new();
    let _ = d.on_frame(Duration::from_secs(1), &g, &i);
    let _ = d.on_frame(Duration::from_secs(1) + FRAME, &g, &i);
    let after = d.on_frame(Duration::from_secs(601), &g, &i).offset;
    assert!((0.0..g.one_copy_height).contains(&after), "offset {after}");
}

#[test]
fn single_item_and_zero_speed_never_move() {
    let g = geometry();
    let i = InteractionState::new();
    for motion in [Motion::new(30.0, 1, false), Motion::new(0.0, 5, false)] {
        let mut d = AnimationDriver::new(motion);
        let mut now = Duration::ZERO;
        for _ in 0..600 {
            now += FRAME;
            assert_eq!(d.on_frame(now, &g, &i).offset, 0.0);
        }
        assert_eq!(d.phase(&i, now), DriverPhase::Idle);
    }
}

#[test]
fn reduced_motion_keeps_offset_zero() {
    let g = geometry();
    let i = InteractionState::new();
    let mut d = AnimationDriver::new(Motion::new(10.0, 5, true));
    for n in 1..=1_000u32 {
        assert_eq!(d.on_frame(FRAME * n, &g, &i).offset, 0.0);
    }
}

#[test]
fn hover_freezes_then_resumes_after_delay() {
    let g = geometry();
    let mut d = AnimationDriver::new(Motion::new(30.0, 5, false));
    let mut i = InteractionState::new();
    let mut now = Duration::from_secs(1);
    for _ in 0..10 {
        now += FRAME;
        let _ = d.on_frame(now, &g, &i);
    }
    i.pointer_enter();
    let frozen = d.offset();
    for _ in 0..10 {
        now += FRAME;
        assert_eq!(d.on_frame(now, &g, &i).offset, frozen);
    }
    i.pointer_leave(now, DEFAULT_RESUME_DELAY);
    let resume_at = now + DEFAULT_RESUME_DELAY;
    while now + FRAME <= resume_at {
        now += FRAME;
        assert_eq!(d.on_frame(now, &g, &i).offset, frozen, "resumed early at {now:?}");
    }
    now = resume_at + FRAME;
    assert!(d.on_frame(now, &g, &i).offset > frozen);
}

proptest! {
    #[test]
    fn any_single_step_stays_in_range(
        start in 0.0f64..228.0,
        elapsed_ms in 0u64..10_000_000,
        speed in 0.1f64..500.0,
    ) {
        let g = Geometry::new(228.0, 136.0, 8.0);
        let next = step(
            OffsetState { offset: start },
            Duration::from_millis(elapsed_ms),
            &g,
            &Motion::new(speed, 5, false),
            &InteractionState::new(),
            Duration::from_millis(elapsed_ms),
        );
        prop_assert!(next.offset >= 0.0 && next.offset < 228.0, "offset {}", next.offset);
    }
}
