use chrono::{NaiveDate, NaiveDateTime};
use timeblock_rs::api::{PointerOutcome, SchedulerConfig, SchedulerEngine};
use timeblock_rs::core::{BlockDraft, BlockId, PointerPosition, TrackId, ViewMode, Viewport};
use timeblock_rs::interaction::{InteractionMode, Modifiers};
use timeblock_rs::render::NullRenderer;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

fn p(x: f64, y: f64) -> PointerPosition {
    PointerPosition::new(x, y)
}

/// DAY view of 2026-10-17 scrolled to midnight, so viewport x equals
/// content x. Track 0 blocks span viewport y 96..144, track 1 208..256.
fn engine() -> SchedulerEngine<NullRenderer> {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(17, 10, 0));
    let mut engine = SchedulerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_scroll_x(0.0);
    engine
}

fn create(
    engine: &mut SchedulerEngine<NullRenderer>,
    track: &str,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> BlockId {
    engine
        .create_block(BlockDraft::new(track, from, to, "Block"))
        .expect("create block")
}

#[test]
fn drag_right_snaps_start_and_preserves_duration() {
    let mut engine = engine();
    let id = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let history_before = engine.history_len();

    // 74px at 2px/min is +37 minutes.
    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_140.0, 120.0));
    assert_eq!(engine.interaction_mode(), InteractionMode::DraggingBlocks);
    engine.pointer_move(p(1_174.0, 120.0));
    let outcome = engine.pointer_up(p(1_174.0, 120.0)).expect("drag end");

    assert_eq!(outcome, PointerOutcome::BlocksMoved(1));
    let block = engine.block(id).expect("block");
    assert_eq!(block.start, at(17, 9, 30));
    assert_eq!(block.end, at(17, 10, 30));
    assert_eq!(engine.history_len(), history_before + 1);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn dragging_selection_down_one_row_shifts_every_track() {
    let mut engine = engine();
    let a = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let b = create(&mut engine, "meetings", at(17, 11, 0), at(17, 12, 0));

    engine.pointer_down(p(1_000.0, 60.0), Modifiers::NONE);
    engine.pointer_move(p(1_500.0, 260.0));
    let outcome = engine.pointer_up(p(1_500.0, 260.0)).expect("band end");
    assert_eq!(outcome, PointerOutcome::SelectionChanged(2));
    assert_eq!(engine.selection(), vec![a, b]);

    let history_before = engine.history_len();
    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_100.0, 232.0));
    engine.pointer_up(p(1_100.0, 232.0)).expect("drag end");

    assert_eq!(engine.block(a).expect("a").track_id, TrackId::from("meetings"));
    assert_eq!(engine.block(b).expect("b").track_id, TrackId::from("wellness"));
    assert_eq!(engine.block(a).expect("a").start, at(17, 9, 0));
    assert_eq!(engine.history_len(), history_before + 1);
}

#[test]
fn track_shift_is_clamped_per_member() {
    let mut engine = engine();
    let a = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let b = create(&mut engine, "learning", at(17, 9, 0), at(17, 10, 0));
    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_up(p(1_100.0, 120.0)).expect("click a");
    engine.pointer_down(p(1_100.0, 456.0), Modifiers::SHIFT);
    engine.pointer_up(p(1_100.0, 456.0)).expect("shift click b");
    assert_eq!(engine.selection(), vec![a, b]);

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_100.0, 232.0));
    engine.pointer_up(p(1_100.0, 232.0)).expect("drag end");

    assert_eq!(engine.block(a).expect("a").track_id, TrackId::from("meetings"));
    assert_eq!(engine.block(b).expect("b").track_id, TrackId::from("learning"));
}

#[test]
fn release_in_delete_zone_removes_block_with_one_commit() {
    let mut engine = engine();
    let id = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let history_before = engine.history_len();

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_100.0, 400.0));
    assert!(!engine.drag_session().expect("session").delete_armed);
    engine.pointer_move(p(1_100.0, 700.0));
    assert!(engine.drag_session().expect("session").delete_armed);
    let outcome = engine.pointer_up(p(1_100.0, 700.0)).expect("drag end");

    assert_eq!(outcome, PointerOutcome::BlocksDeleted(1));
    assert!(engine.block(id).is_none());
    assert_eq!(engine.history_len(), history_before + 1);
}

#[test]
fn view_round_trip_through_month_is_deterministic() {
    let mut engine = SchedulerEngine::new(
        NullRenderer::default(),
        SchedulerConfig::new(Viewport::new(1600, 800), at(17, 10, 0)),
    )
    .expect("engine init");
    let initial = engine.snapshot();
    // now (10:00) is visible, so it lands 100px from the left edge.
    assert_eq!(initial.scroll_x, 1_100.0);

    engine.set_scroll_x(250.0);
    engine.set_view_mode(ViewMode::Month).expect("month");
    assert_eq!(engine.view_range().start, at(1, 0, 0));
    engine.set_view_mode(ViewMode::Day).expect("day");

    assert_eq!(engine.view_range(), initial.view_range);
    assert_eq!(engine.scroll_x(), initial.scroll_x);
}

#[test]
fn day_without_now_anchors_at_eight() {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(17, 10, 0))
        .with_view_date(NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"));
    let engine = SchedulerEngine::new(NullRenderer::default(), config).expect("engine init");
    assert_eq!(engine.scroll_x(), 8.0 * 60.0 * 2.0 - 100.0);
}

#[test]
fn small_release_on_empty_canvas_opens_prefilled_create_form() {
    let mut engine = engine();
    engine.pointer_down(p(300.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(303.0, 122.0));
    let outcome = engine.pointer_up(p(303.0, 122.0)).expect("click");

    assert_eq!(outcome, PointerOutcome::CreateFormOpened);
    let form = engine.form().expect("form open");
    assert_eq!(form.draft.title, "New Block");
    assert_eq!(form.draft.track_id, TrackId::from("deep_work"));
    assert_eq!(form.draft.start, at(17, 2, 30));
    assert_eq!(form.draft.end, at(17, 3, 0));
    assert!(engine.selection().is_empty());
}

#[test]
fn click_in_track_gap_does_nothing() {
    let mut engine = engine();
    // content y 120 is 104px into the first stride, inside the 16px gap.
    engine.pointer_down(p(300.0, 168.0), Modifiers::NONE);
    let outcome = engine.pointer_up(p(300.0, 168.0)).expect("click");
    assert_eq!(outcome, PointerOutcome::None);
    assert!(!engine.is_form_open());
}

#[test]
fn plain_click_selects_exactly_one_and_opens_details() {
    let mut engine = engine();
    let a = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let b = create(&mut engine, "meetings", at(17, 9, 0), at(17, 10, 0));

    engine.pointer_down(p(1_100.0, 230.0), Modifiers::NONE);
    engine.pointer_up(p(1_100.0, 230.0)).expect("click b");
    engine.pointer_down(p(1_100.0, 120.0), Modifiers::SHIFT);
    engine.pointer_up(p(1_100.0, 120.0)).expect("shift click a");
    assert_eq!(engine.selection(), vec![b, a]);

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::SHIFT);
    engine.pointer_up(p(1_100.0, 120.0)).expect("toggle a off");
    assert_eq!(engine.selection(), vec![b]);

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    let outcome = engine.pointer_up(p(1_100.0, 120.0)).expect("click a");
    assert_eq!(outcome, PointerOutcome::BlockClicked(a));
    assert_eq!(engine.selection(), vec![a]);
    assert_eq!(engine.detail_block().map(|block| block.id), Some(a));
}

#[test]
fn additive_rubber_band_keeps_previous_selection() {
    let mut engine = engine();
    let a = create(&mut engine, "deep_work", at(17, 1, 0), at(17, 2, 0));
    let b = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));

    engine.pointer_down(p(150.0, 120.0), Modifiers::NONE);
    engine.pointer_up(p(150.0, 120.0)).expect("click a");
    assert_eq!(engine.selection(), vec![a]);

    engine.pointer_down(p(1_000.0, 60.0), Modifiers::SHIFT);
    engine.pointer_move(p(1_250.0, 150.0));
    engine.pointer_up(p(1_250.0, 150.0)).expect("band end");
    assert_eq!(engine.selection(), vec![a, b]);

    engine.pointer_down(p(1_000.0, 60.0), Modifiers::NONE);
    engine.pointer_move(p(1_250.0, 150.0));
    engine.pointer_up(p(1_250.0, 150.0)).expect("band end");
    assert_eq!(engine.selection(), vec![b]);
}

#[test]
fn pointer_leave_ends_rubber_band_but_not_drag() {
    let mut engine = engine();
    let id = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));

    engine.pointer_down(p(1_000.0, 60.0), Modifiers::NONE);
    engine.pointer_move(p(1_250.0, 150.0));
    assert!(engine.selection_box().is_some());
    engine.pointer_leave();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(engine.selection_box().is_none());
    assert_eq!(engine.selection(), vec![id]);
    assert!(!engine.is_form_open());

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_160.0, 120.0));
    engine.pointer_leave();
    assert_eq!(engine.interaction_mode(), InteractionMode::DraggingBlocks);
    engine.pointer_up(p(1_160.0, 120.0)).expect("drag end");
    assert_eq!(engine.block(id).expect("block").start, at(17, 9, 30));
}

#[test]
fn drop_at_origin_records_nothing() {
    let mut engine = engine();
    create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));
    let history_before = engine.history_len();

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    engine.pointer_move(p(1_120.0, 120.0));
    engine.pointer_move(p(1_102.0, 120.0));
    let outcome = engine.pointer_up(p(1_102.0, 120.0)).expect("drag end");

    assert_eq!(outcome, PointerOutcome::BlocksMoved(0));
    assert_eq!(engine.history_len(), history_before);
}

#[test]
fn release_past_threshold_without_move_is_a_drag() {
    let mut engine = engine();
    let id = create(&mut engine, "deep_work", at(17, 9, 0), at(17, 10, 0));

    engine.pointer_down(p(1_100.0, 120.0), Modifiers::NONE);
    let outcome = engine.pointer_up(p(1_174.0, 120.0)).expect("drag end");

    assert_eq!(outcome, PointerOutcome::BlocksMoved(1));
    assert_eq!(engine.block(id).expect("block").start, at(17, 9, 30));
    assert!(engine.detail_block().is_none());
}
