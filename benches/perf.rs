use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ffstat_terminal::provider::seed_stats;
use ffstat_terminal::state::{AppState, Delta, apply_delta};
use ffstat_terminal::stats::{
    SortDirection, SortSpec, StatField, filter_records, paginate, sort_records,
};
use ffstat_terminal::stats_fetch::parse_player_stats_json;

fn bench_parse(c: &mut Criterion) {
    let records = seed_stats(500, 42);
    let raw = serde_json::to_string(&records).expect("records serialize");
    c.bench_function("stats_parse_500", |b| {
        b.iter(|| {
            let parsed = parse_player_stats_json(black_box(&raw)).unwrap();
            black_box(parsed.len());
        })
    });
}

fn bench_sort_filter_page(c: &mut Criterion) {
    let records = seed_stats(500, 42);
    let sort = SortSpec {
        field: StatField::ReceivingYards,
        direction: SortDirection::Desc,
    };
    c.bench_function("sort_filter_page_500", |b| {
        b.iter(|| {
            let sorted = sort_records(black_box(&records), sort);
            let filtered = filter_records(&sorted, black_box("al"));
            let page = paginate(&filtered, 2);
            black_box(page.len());
        })
    });
}

fn bench_state_page_records(c: &mut Criterion) {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetStats {
            records: seed_stats(500, 42),
            updated: "bench".to_string(),
        },
    );
    for name in state
        .sorted_records()
        .iter()
        .take(15)
        .map(|r| r.player.clone())
        .collect::<Vec<_>>()
    {
        state.toggle_player(&name);
    }

    c.bench_function("state_page_and_total", |b| {
        b.iter(|| {
            let rows = state.page_records();
            black_box(rows.len());
            black_box(state.total_points());
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_sort_filter_page,
    bench_state_page_records
);
criterion_main!(benches);
