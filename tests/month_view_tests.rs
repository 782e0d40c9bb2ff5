use chrono::{NaiveDate, NaiveDateTime};
use timeblock_rs::api::{PointerOutcome, SchedulerConfig, SchedulerEngine};
use timeblock_rs::core::{BlockDraft, PointerPosition, ViewMode, Viewport};
use timeblock_rs::interaction::Modifiers;
use timeblock_rs::render::NullRenderer;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).expect("date")
}

fn month_engine() -> SchedulerEngine<NullRenderer> {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(17, 10, 0))
        .with_view_mode(ViewMode::Month);
    SchedulerEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn fill_oct_fifth(engine: &mut SchedulerEngine<NullRenderer>) {
    for hour in 8..14 {
        engine
            .create_block(BlockDraft::new(
                "deep_work",
                at(5, hour, 0),
                at(5, hour, 30),
                format!("Session {hour}"),
            ))
            .expect("create");
    }
}

#[test]
fn month_grid_lists_four_entries_and_counts_the_rest() {
    let mut engine = month_engine();
    fill_oct_fifth(&mut engine);

    let grid = engine.month_grid().expect("grid");
    assert_eq!(grid.leading_blanks, 4);
    let day = &grid.days[4];
    assert_eq!(day.date, date(5));
    assert_eq!(day.entries.len(), 4);
    assert_eq!(day.overflow, 2);
    assert_eq!(day.entries[0].title, "Session 8");
}

#[test]
fn month_frame_shows_overflow_label() {
    let mut engine = month_engine();
    fill_oct_fifth(&mut engine);
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.has_text("+2 more"));
    assert!(frame.has_text("SUN"));
    assert!(frame.has_text("Session 11"));
    assert!(!frame.has_text("Session 12"));
}

#[test]
fn clicking_a_day_drills_into_day_view() {
    let mut engine = month_engine();
    // Oct 5 sits in column 1, row 1 (4 leading blanks).
    let position = PointerPosition::new(342.9, 212.0);
    assert_eq!(engine.month_day_at(position), Some(date(5)));

    engine.pointer_down(position, Modifiers::NONE);
    let outcome = engine.pointer_up(position).expect("click");
    assert_eq!(outcome, PointerOutcome::DrilledIntoDay(date(5)));
    assert_eq!(engine.view_mode(), ViewMode::Day);
    assert_eq!(engine.view_range().start, at(5, 0, 0));
    // "now" is outside Oct 5, so the view opens at 08:00.
    assert_eq!(engine.scroll_x(), 860.0);
}

#[test]
fn release_on_another_day_does_not_drill_in() {
    let mut engine = month_engine();
    let oct_fifth = PointerPosition::new(342.9, 212.0);
    let oct_23rd = PointerPosition::new(1_300.0, 500.0);
    assert_eq!(engine.month_day_at(oct_23rd), Some(date(23)));

    engine.pointer_down(oct_fifth, Modifiers::NONE);
    engine.pointer_move(oct_23rd);
    let outcome = engine.pointer_up(oct_23rd).expect("release");
    assert_eq!(outcome, PointerOutcome::None);
    assert_eq!(engine.view_mode(), ViewMode::Month);

    // A jitter under the click threshold still counts as a click.
    engine.pointer_down(oct_fifth, Modifiers::NONE);
    let outcome = engine
        .pointer_up(PointerPosition::new(344.9, 213.0))
        .expect("click");
    assert_eq!(outcome, PointerOutcome::DrilledIntoDay(date(5)));
}

#[test]
fn blank_cells_and_header_hit_nothing() {
    let engine = month_engine();
    assert_eq!(engine.month_day_at(PointerPosition::new(100.0, 100.0)), None);
    assert_eq!(engine.month_day_at(PointerPosition::new(100.0, 10.0)), None);
    assert_eq!(
        engine.month_day_at(PointerPosition::new(1_000.0, 100.0)),
        Some(date(1))
    );
}

#[test]
fn shifting_month_view_moves_by_calendar_months() {
    let mut engine = month_engine();
    engine.shift_view(1).expect("next");
    assert_eq!(
        engine.view_range().start.date(),
        NaiveDate::from_ymd_opt(2026, 11, 1).expect("date")
    );
    engine.shift_view(-2).expect("back");
    assert_eq!(
        engine.view_range().start.date(),
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("date")
    );
}
