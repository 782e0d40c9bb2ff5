use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeblock_rs::api::{SchedulerConfig, SchedulerEngine};
use timeblock_rs::core::{
    BlockDraft, BlockStore, CanvasGeometry, CanvasRect, MonthGrid, TimeScale, TrackSet, ViewMode,
    Viewport, default_tracks, intersecting, layout_blocks,
};
use timeblock_rs::render::NullRenderer;

const TRACK_IDS: [&str; 4] = ["deep_work", "meetings", "wellness", "learning"];

fn month_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid time")
}

/// `count` half-hour blocks spread across the month and all four tracks.
fn drafts(count: usize) -> Vec<BlockDraft> {
    (0..count)
        .map(|i| {
            let start = month_start() + Duration::minutes((i as i64 * 37) % (30 * 24 * 60));
            BlockDraft::new(
                TRACK_IDS[i % TRACK_IDS.len()],
                start,
                start + Duration::minutes(30),
                format!("Block {i}"),
            )
        })
        .collect()
}

fn store_with(count: usize) -> BlockStore {
    let mut store = BlockStore::new();
    for draft in drafts(count) {
        store.create(draft).expect("valid generated block");
    }
    store
}

fn bench_time_scale_round_trip(c: &mut Criterion) {
    let mode = ViewMode::Week;
    let range = mode
        .range_for(NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"))
        .expect("range");
    let scale = TimeScale::for_view(range, mode.config()).expect("valid scale");
    let time = range.start + Duration::minutes(4_321);

    c.bench_function("time_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.date_to_px(black_box(time));
            let _ = scale.px_to_date(px).expect("from pixel");
        })
    });
}

fn bench_rubber_band_2k(c: &mut Criterion) {
    let mode = ViewMode::Month;
    let range = mode.range_for(month_start().date()).expect("range");
    let scale = TimeScale::for_view(range, mode.config()).expect("valid scale");
    let store = store_with(2_000);
    let tracks = TrackSet::new(default_tracks());
    let geometry = CanvasGeometry::default();
    let selection_box = CanvasRect::new(200.0, 0.0, 400.0, 260.0);

    c.bench_function("rubber_band_2k", |b| {
        b.iter(|| {
            let layouts = layout_blocks(&store, &tracks, scale, geometry);
            let _ = intersecting(&layouts, black_box(selection_box));
        })
    });
}

fn bench_month_grid_2k(c: &mut Criterion) {
    let store = store_with(2_000);
    let blocks = store.snapshot();

    c.bench_function("month_grid_2k", |b| {
        b.iter(|| {
            let _ = MonthGrid::build(black_box(month_start().date()), &blocks, 4)
                .expect("grid should build");
        })
    });
}

fn bench_engine_snapshot_json_500(c: &mut Criterion) {
    let config = SchedulerConfig::new(Viewport::new(1920, 1080), month_start());
    let mut engine = SchedulerEngine::new(NullRenderer::default(), config).expect("engine init");
    for draft in drafts(500) {
        engine.create_block(draft).expect("valid generated block");
    }

    c.bench_function("engine_snapshot_json_500", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot()
                .to_json_contract_v1_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_time_scale_round_trip,
    bench_rubber_band_2k,
    bench_month_grid_2k,
    bench_engine_snapshot_json_500
);
criterion_main!(benches);
