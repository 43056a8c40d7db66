//! Benchmarks for the statline feature pipeline.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use statline_pipeline::FeaturePipeline;
use statline_primitives::{AtBatId, Date, GameId, PlayerId, RawEvent};

const OUTCOMES: [&str; 5] = ["single", "strikeout", "walk", "field_out", "home_run"];

/// `games` games of `at_bats` plate appearances, three pitches each.
fn generate_events(games: u64, at_bats: u64, players: u64) -> Vec<RawEvent> {
    let mut rng = rand::thread_rng();
    let opening = Date::from_ymd_opt(2024, 3, 28).unwrap();

    let mut events = Vec::new();
    for game in 0..games {
        let date = opening + chrono::Days::new(game / 8);
        for at_bat in 1..=at_bats {
            let batter = Some(PlayerId::new(rng.gen_range(0..players)));
            let pitcher = Some(PlayerId::new(10_000 + rng.gen_range(0..players / 4 + 1)));
            for pitch in 0..3 {
                let mut event =
                    RawEvent::new(date, GameId::new(game), AtBatId::new(at_bat), batter, pitcher)
                        .with_velocity(rng.gen_range(82.0..100.0));
                if pitch == 2 {
                    event = event.with_outcome(OUTCOMES[rng.gen_range(0..OUTCOMES.len())]);
                }
                events.push(event);
            }
        }
    }
    events
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    group.sample_size(20);

    for games in [100, 500, 1_500] {
        let events = generate_events(games, 75, 400);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(games), &events, |b, events| {
            let pipeline = FeaturePipeline::new();
            b.iter(|| pipeline.run(black_box(events)).unwrap());
        });
    }

    group.finish();
}

fn bench_to_frame(c: &mut Criterion) {
    let events = generate_events(500, 75, 400);
    let table = FeaturePipeline::new().run(&events).unwrap();

    c.bench_function("feature_table_to_frame", |b| {
        b.iter(|| black_box(&table).to_frame().unwrap());
    });
}

criterion_group!(benches, bench_pipeline, bench_to_frame);

criterion_main!(benches);
