//! End-to-end scenarios for the marquee engine
//!
//! Drives the public marquee API through whole sessions: building a track,
//! padding it for a viewport, scrolling with pauses and re-measures, and
//! checking the offset stays normalized throughout.

use tubedeck::marquee::{measure_group_width, Marquee, Track, MAX_CLONE_PASSES};

const EPS: f32 = 1e-3;

#[test]
fn test_three_card_row_in_wide_viewport() {
    // Three cards of 300 units each, no gap: one group spans 900 units.
    let widths = |_: usize| 300.0;
    let mut track = Track::new(vec!["a", "b", "c"]);
    let group_width = measure_group_width(&widths, track.len(), track.group_len(), 0.0);
    assert!((group_width - 900.0).abs() < EPS);

    // Viewport 1200: the track must cover 2 * 1200 + 900 = 3300.
    track.ensure_enough_clones(1200.0, group_width, &widths, 0.0);
    let total = track.total_width(&widths, 0.0);
    assert!(total >= 3300.0, "track width {} too short", total);

    // Scroll at 60 units/s for 17.5s: 1050 total, 1050 mod 900 = 150.
    let mut marquee = Marquee::new(60.0, group_width);
    for _ in 0..175 {
        marquee.tick(0.1);
        assert!(marquee.offset() >= 0.0 && marquee.offset() < group_width);
    }
    assert!((marquee.offset() - 150.0).abs() < 0.1, "offset {}", marquee.offset());
}

#[test]
fn test_pause_and_resume_session() {
    let mut marquee = Marquee::new(60.0, 300.0);

    marquee.tick(2.0); // 120
    marquee.set_paused(true);
    for _ in 0..100 {
        marquee.tick(0.033);
    }
    assert!((marquee.offset() - 120.0).abs() < EPS);

    marquee.set_paused(false);
    marquee.tick(1.0); // 180
    assert!((marquee.offset() - 180.0).abs() < EPS);
}

#[test]
fn test_viewport_growth_adds_clones_and_renormalizes() {
    let widths = |_: usize| 100.0;
    let mut track = Track::new(vec![1, 2, 3]);
    let group_width = measure_group_width(&widths, track.len(), track.group_len(), 0.0);
    track.ensure_enough_clones(400.0, group_width, &widths, 0.0);
    let before = track.len();

    let mut marquee = Marquee::new(60.0, group_width);
    marquee.tick(4.0); // 240

    // Terminal grows: more clones are needed and the measurement is re-adopted.
    track.ensure_enough_clones(900.0, group_width, &widths, 0.0);
    assert!(track.len() > before, "wider viewport must add clones");
    marquee.remeasure(group_width);
    assert!(marquee.offset() >= 0.0 && marquee.offset() < group_width);
    assert!((marquee.offset() - 240.0).abs() < EPS, "offset preserved when width unchanged");
}

#[test]
fn test_shrinking_group_renormalizes_offset() {
    // A card disappears on refresh: group shrinks from 900 to 750 while the
    // offset sits at 800.
    let mut marquee = Marquee::new(60.0, 900.0);
    marquee.tick(800.0 / 60.0);
    assert!((marquee.offset() - 800.0).abs() < 0.1);

    marquee.remeasure(750.0);
    assert!(marquee.offset() < 750.0);
    assert!((marquee.offset() - 50.0).abs() < 0.1);
}

#[test]
fn test_clone_padding_is_bounded_for_tiny_groups() {
    let widths = |_: usize| 1.5;
    let mut track = Track::new(vec![0u8; 2]);
    let group_width = measure_group_width(&widths, track.len(), track.group_len(), 0.0);

    let appended = track.ensure_enough_clones(10_000.0, group_width, &widths, 0.0);
    assert_eq!(appended, MAX_CLONE_PASSES);
    assert_eq!(track.len(), 2 * (1 + MAX_CLONE_PASSES));
}

#[test]
fn test_stopped_marquee_ignores_further_ticks() {
    let mut marquee = Marquee::new(60.0, 300.0);
    marquee.tick(1.0);
    let at = marquee.offset();

    marquee.stop();
    for _ in 0..50 {
        marquee.tick(0.5);
    }
    assert_eq!(marquee.offset(), at);
}
