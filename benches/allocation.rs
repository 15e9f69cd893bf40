use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wms_engine::{AllocationCalculator, InventorySummarizer, Lot, LotLocation, LotStatus, StoragePolicy};

fn generate_lots(count: usize) -> Vec<Lot> {
    let mut rng = StdRng::seed_from_u64(42);
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let status = if rng.gen_bool(0.1) { LotStatus::Hold } else { LotStatus::Active };
            Lot::new(
                format!("LOT-{:05}", i),
                "ADTV-001".to_string(),
                LotLocation::new("wh-1", &format!("rack-{}", rng.gen_range(1..20)), &format!("pallet-{}", rng.gen_range(1..200))),
                rng.gen_range(1..500),
                base + Duration::days(rng.gen_range(0..60)),
                base + Duration::days(rng.gen_range(30..400)),
                StoragePolicy::Fefo,
            )
            .with_status(status)
        })
        .collect()
}

fn bench_allocation(c: &mut Criterion) {
    let lots = generate_lots(1_000);
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    c.bench_function("allocate_1000_lots", |b| {
        b.iter(|| AllocationCalculator::allocate(black_box(&lots), black_box(25_000), now))
    });

    c.bench_function("summarize_1000_lots", |b| {
        b.iter(|| InventorySummarizer::summarize(black_box(&lots), 500_000, now))
    });
}

criterion_group!(benches, bench_allocation);
criterion_main!(benches);
