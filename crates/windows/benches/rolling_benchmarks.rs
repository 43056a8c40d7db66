//! Benchmarks for statline-windows aggregation.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use statline_primitives::{DailyStat, Date, PlayerId, Role};
use statline_traits::WindowAggregator;
use statline_windows::{RollingAggregator, SeasonAggregator, SeasonMode};

/// Daily rollups for `players` players over one season, playing roughly
/// five days in six.
fn generate_daily(players: u64, days: u32) -> Vec<DailyStat> {
    let mut rng = rand::thread_rng();
    let opening = Date::from_ymd_opt(2024, 3, 28).unwrap();

    let mut out = Vec::new();
    for player in 0..players {
        for date in opening.iter_days().take(days as usize) {
            if rng.gen_range(0..6) == 0 {
                continue;
            }
            let exposures = rng.gen_range(1..6);
            out.push(DailyStat {
                exposures,
                hits: rng.gen_range(0..=exposures),
                strikeouts: 0,
                walks: 0,
                mean_velocity: rng.gen_range(85.0..99.0),
                ..DailyStat::empty(PlayerId::new(player), Role::Batter, date)
            });
        }
    }
    out
}

fn bench_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_aggregate");

    for players in [10, 100, 500] {
        let daily = generate_daily(players, 186);
        group.throughput(Throughput::Elements(daily.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(players), &daily, |b, daily| {
            let aggregator = RollingAggregator::new();
            b.iter(|| aggregator.aggregate(black_box(daily)));
        });
    }

    group.finish();
}

fn bench_season(c: &mut Criterion) {
    let mut group = c.benchmark_group("season_aggregate");
    let daily = generate_daily(200, 186);
    group.throughput(Throughput::Elements(daily.len() as u64));

    for mode in [SeasonMode::CalendarTotal, SeasonMode::ToDate] {
        group.bench_with_input(BenchmarkId::new("mode", format!("{mode:?}")), &daily, |b, daily| {
            let aggregator = SeasonAggregator::with_mode(mode);
            b.iter(|| aggregator.aggregate(black_box(daily)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rolling, bench_season);

criterion_main!(benches);
