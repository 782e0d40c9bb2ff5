use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use proptest::prelude::*;
use timeblock_rs::api::{SchedulerConfig, SchedulerEngine};
use timeblock_rs::core::{
    BlockDraft, BlockId, BlockPatch, History, HistoryEntry, PointerPosition, TimeScale, ViewMode,
    Viewport,
};
use timeblock_rs::interaction::Modifiers;
use timeblock_rs::render::NullRenderer;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

fn engine() -> SchedulerEngine<NullRenderer> {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(10, 0));
    let mut engine = SchedulerEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_scroll_x(0.0);
    engine
}

fn mode_strategy() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Day), Just(ViewMode::Week), Just(ViewMode::Month)]
}

/// One committed-or-rejected edit applied to a live engine.
#[derive(Debug, Clone)]
enum Edit {
    Create { track: usize, hour: u32 },
    Shift { pick: usize, minutes: i64 },
    Drag { pick: usize, dx: f64, dy: f64 },
    BulkDelete { picks: Vec<usize> },
    AddTrack { name: usize },
    RenameTrack { pick: usize, name: usize },
    RemoveTrack { pick: usize },
}

const TRACK_NAMES: [&str; 3] = ["Reading", "Errands", "Deep Work"];

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0usize..8, 0u32..23).prop_map(|(track, hour)| Edit::Create { track, hour }),
        2 => (0usize..16, -180i64..180).prop_map(|(pick, minutes)| Edit::Shift { pick, minutes }),
        3 => (0usize..16, -400.0f64..400.0, -120.0f64..400.0)
            .prop_map(|(pick, dx, dy)| Edit::Drag { pick, dx, dy }),
        1 => prop::collection::vec(0usize..16, 1..4).prop_map(|picks| Edit::BulkDelete { picks }),
        1 => (0usize..TRACK_NAMES.len()).prop_map(|name| Edit::AddTrack { name }),
        1 => (0usize..8, 0usize..TRACK_NAMES.len())
            .prop_map(|(pick, name)| Edit::RenameTrack { pick, name }),
        1 => (0usize..8).prop_map(|pick| Edit::RemoveTrack { pick }),
    ]
}

fn pick_block(engine: &SchedulerEngine<NullRenderer>, pick: usize) -> Option<BlockId> {
    let ids: Vec<BlockId> = engine.blocks().map(|block| block.id).collect();
    (!ids.is_empty()).then(|| ids[pick % ids.len()])
}

fn apply(engine: &mut SchedulerEngine<NullRenderer>, edit: &Edit) {
    match edit {
        Edit::Create { track, hour } => {
            let tracks = engine.tracks();
            if tracks.is_empty() {
                return;
            }
            let track_id = tracks[track % tracks.len()].id.clone();
            let _ = engine.create_block(BlockDraft::new(
                track_id,
                at(*hour, 0),
                at(*hour, 30),
                "Generated",
            ));
        }
        Edit::Shift { pick, minutes } => {
            if let Some(id) = pick_block(engine, *pick) {
                if let Some(block) = engine.block(id).cloned() {
                    let delta = Duration::minutes(*minutes);
                    let _ = engine.update_block(
                        id,
                        BlockPatch::times(block.start + delta, block.end + delta),
                    );
                }
            }
        }
        Edit::Drag { pick, dx, dy } => {
            let layouts = engine.block_layouts();
            if layouts.is_empty() {
                return;
            }
            let rect = layouts[pick % layouts.len()].rect;
            let x = rect.x - engine.scroll_x() + rect.width / 2.0;
            let y = rect.y + 48.0 + rect.height / 2.0;
            engine.pointer_down(PointerPosition::new(x, y), Modifiers::NONE);
            engine.pointer_move(PointerPosition::new(x + dx, y + dy));
            let _ = engine.pointer_up(PointerPosition::new(x + dx, y + dy));
            engine.cancel_form();
        }
        Edit::BulkDelete { picks } => {
            let ids: Vec<BlockId> = picks
                .iter()
                .filter_map(|pick| pick_block(engine, *pick))
                .collect();
            engine.delete_blocks(&ids);
        }
        Edit::AddTrack { name } => {
            let _ = engine.add_track(TRACK_NAMES[*name], "#a855f7");
        }
        Edit::RenameTrack { pick, name } => {
            let tracks = engine.tracks();
            if tracks.is_empty() {
                return;
            }
            let id = tracks[pick % tracks.len()].id.clone();
            let _ = engine.rename_track(&id, TRACK_NAMES[*name]);
        }
        Edit::RemoveTrack { pick } => {
            let tracks = engine.tracks();
            if tracks.len() <= 1 {
                return;
            }
            let id = tracks[pick % tracks.len()].id.clone();
            if let Ok(request) = engine.begin_track_removal(&id) {
                let _ = engine.confirm_track_removal(request);
            }
        }
    }
}

proptest! {
    #[test]
    fn mapper_round_trips_to_the_millisecond(
        mode in mode_strategy(),
        day in 1u32..=28,
        offset_factor in 0.0f64..1.0
    ) {
        let date = NaiveDate::from_ymd_opt(2026, 10, day).expect("date");
        let range = mode.range_for(date).expect("range");
        let scale = TimeScale::for_view(range, mode.config()).expect("scale");

        let offset_ms = (offset_factor * range.duration_ms() as f64).floor() as i64;
        let time = range.start + Duration::milliseconds(offset_ms);
        let recovered = scale.px_to_date(scale.date_to_px(time)).expect("px to date");

        prop_assert_eq!(recovered, time);
    }

    #[test]
    fn drag_keeps_duration_and_snaps_start(
        dx in prop_oneof![-600.0f64..-10.0, 10.0f64..600.0],
        dy in -50.0f64..300.0
    ) {
        let mut engine = engine();
        let id = engine
            .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "Focus"))
            .expect("create");

        engine.pointer_down(PointerPosition::new(1_100.0, 120.0), Modifiers::NONE);
        engine.pointer_move(PointerPosition::new(1_100.0 + dx, 120.0 + dy));
        engine
            .pointer_up(PointerPosition::new(1_100.0 + dx, 120.0 + dy))
            .expect("drag end");

        let block = engine.block(id).expect("block");
        prop_assert_eq!(block.end - block.start, Duration::minutes(60));
        prop_assert_eq!(block.start.minute() % 15, 0);
        prop_assert_eq!(block.start.second(), 0);
        prop_assert!(engine.tracks().iter().any(|track| track.id == block.track_id));
    }

    #[test]
    fn rejected_range_leaves_store_untouched(
        start_minute in 0i64..1_380,
        backwards in 0i64..600
    ) {
        let mut engine = engine();
        let id = engine
            .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "Focus"))
            .expect("create");
        let before = engine.snapshot();

        let start = at(0, 0) + Duration::minutes(start_minute);
        let end = start - Duration::minutes(backwards);
        prop_assert!(engine.update_block(id, BlockPatch::times(start, end)).is_err());
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn undo_then_redo_restores_state(
        created in 1usize..12,
        steps_back in 0usize..12
    ) {
        let mut engine = engine();
        for index in 0..created {
            let hour = u32::try_from(index).expect("small index");
            engine
                .create_block(BlockDraft::new(
                    "deep_work",
                    at(hour, 0),
                    at(hour, 45),
                    format!("Block {index}"),
                ))
                .expect("create");
        }
        let before = engine.snapshot();
        let steps = steps_back.min(created);

        for _ in 0..steps {
            prop_assert!(engine.undo());
        }
        prop_assert_eq!(engine.block_count(), created - steps);
        for _ in 0..steps {
            prop_assert!(engine.redo());
        }
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn undo_and_redo_are_inverse_over_mixed_edits(
        edits in prop::collection::vec(edit_strategy(), 1..24)
    ) {
        let mut engine = engine();
        let initial = engine.snapshot();
        for edit in &edits {
            apply(&mut engine, edit);
        }
        let last = engine.snapshot();
        let commits = engine.history_index();

        for _ in 0..commits {
            prop_assert!(engine.undo());
        }
        prop_assert!(!engine.can_undo());
        let undone = engine.snapshot();
        prop_assert_eq!(&undone.blocks, &initial.blocks);
        prop_assert_eq!(&undone.tracks, &initial.tracks);

        for _ in 0..commits {
            prop_assert!(engine.redo());
        }
        prop_assert!(!engine.can_redo());
        let redone = engine.snapshot();
        prop_assert_eq!(&redone.blocks, &last.blocks);
        prop_assert_eq!(&redone.tracks, &last.tracks);
    }

    #[test]
    fn history_never_exceeds_its_limit(
        limit in 1usize..20,
        commits in 0usize..60
    ) {
        let entry = || HistoryEntry { blocks: Vec::new(), tracks: Vec::new() };
        let mut history = History::new(entry(), limit).expect("history");
        for _ in 0..commits {
            history.commit(entry());
        }
        prop_assert_eq!(history.len(), (commits + 1).min(limit));
        prop_assert_eq!(history.index(), history.len() - 1);
    }
}
