use chrono::{NaiveDate, NaiveDateTime};
use timeblock_rs::api::{SchedulerConfig, SchedulerEngine};
use timeblock_rs::core::{
    Block, BlockDraft, BlockId, BlockPatch, History, HistoryEntry, PointerPosition, TrackId,
    Viewport, default_tracks,
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
    SchedulerEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn seed_block() -> Block {
    Block {
        id: BlockId(1),
        track_id: TrackId::from("deep_work"),
        start: at(6, 0),
        end: at(8, 0),
        title: "Core Architecture".to_owned(),
        desc: "Refining the Firmament kernel.".to_owned(),
        linked_type: None,
        linked_id: None,
    }
}

#[test]
fn seeded_blocks_are_the_first_entry_and_cannot_be_undone() {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(10, 0));
    let mut engine =
        SchedulerEngine::with_blocks(NullRenderer::default(), config, vec![seed_block()])
            .expect("engine init");
    assert_eq!(engine.history_len(), 1);
    assert!(!engine.can_undo());
    assert!(!engine.undo());
    assert_eq!(engine.block_count(), 1);
}

#[test]
fn undo_and_redo_walk_the_log() {
    let mut engine = engine();
    let id = engine
        .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "Focus"))
        .expect("create");
    engine
        .update_block(id, BlockPatch::times(at(11, 0), at(12, 0)))
        .expect("update");

    assert!(engine.undo());
    assert_eq!(engine.block(id).expect("block").start, at(9, 0));
    assert!(engine.undo());
    assert!(engine.block(id).is_none());
    assert!(!engine.can_undo());

    assert!(engine.redo());
    assert!(engine.redo());
    assert_eq!(engine.block(id).expect("block").start, at(11, 0));
    assert!(!engine.redo());
}

#[test]
fn commit_after_undo_discards_redo_tail() {
    let mut engine = engine();
    engine
        .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "A"))
        .expect("a");
    engine
        .create_block(BlockDraft::new("deep_work", at(10, 0), at(11, 0), "B"))
        .expect("b");
    assert!(engine.undo());
    engine
        .create_block(BlockDraft::new("meetings", at(12, 0), at(13, 0), "C"))
        .expect("c");

    assert!(!engine.can_redo());
    assert_eq!(engine.history_len(), 3);
    let titles: Vec<_> = engine.blocks().map(|block| block.title.clone()).collect();
    assert_eq!(titles, vec!["A".to_owned(), "C".to_owned()]);
}

#[test]
fn history_is_bounded_to_fifty_entries() {
    let mut engine = engine();
    for minute in 0..60 {
        engine
            .create_block(BlockDraft::new(
                "deep_work",
                at(9, minute % 60),
                at(10, minute % 60),
                format!("Block {minute}"),
            ))
            .expect("create");
    }
    assert_eq!(engine.history_len(), 50);
    assert_eq!(engine.history_index(), 49);

    let mut undos = 0;
    while engine.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    // The oldest retained entry still holds the first eleven blocks.
    assert_eq!(engine.block_count(), 11);
}

#[test]
fn failed_edit_records_nothing() {
    let mut engine = engine();
    let id = engine
        .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "Focus"))
        .expect("create");
    let before = engine.history_len();
    assert!(engine.update_block(id, BlockPatch::times(at(10, 0), at(9, 0))).is_err());
    assert_eq!(engine.history_len(), before);
}

#[test]
fn undo_prunes_selection_of_vanished_blocks() {
    let mut engine = engine();
    engine
        .create_block(BlockDraft::new("deep_work", at(9, 0), at(10, 0), "Focus"))
        .expect("create");
    engine.set_scroll_x(0.0);
    let click = PointerPosition::new(1_100.0, 120.0);
    engine.pointer_down(click, Modifiers::NONE);
    engine.pointer_up(click).expect("click");
    assert_eq!(engine.selection().len(), 1);

    assert!(engine.undo());
    assert!(engine.selection().is_empty());
    assert!(engine.detail_block().is_none());
}

#[test]
fn history_limit_drops_oldest_entries() {
    let entry = |count: usize| HistoryEntry {
        blocks: Vec::new(),
        tracks: default_tracks().into_iter().take(count).collect(),
    };
    let mut history = History::new(entry(1), 3).expect("history");
    history.commit(entry(2));
    history.commit(entry(3));
    history.commit(entry(4));
    assert_eq!(history.len(), 3);
    assert_eq!(history.index(), 2);
    assert_eq!(history.undo().map(|e| e.tracks.len()), Some(3));
    assert_eq!(history.undo().map(|e| e.tracks.len()), Some(2));
    assert!(history.undo().is_none());
}

#[test]
fn seeding_with_the_largest_block_id_is_rejected() {
    let config = SchedulerConfig::new(Viewport::new(1600, 800), at(10, 0));
    let mut block = seed_block();
    block.id = BlockId(u64::MAX);
    let result = SchedulerEngine::with_blocks(NullRenderer::default(), config, vec![block]);
    assert!(result.is_err());
}
