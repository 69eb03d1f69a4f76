use broadphase::sap::{Config, ProxyId, SweepPrune};
use common::shapes::Aabb;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

const GROUP: u16 = 0x01;

fn build_grid(sap: &mut SweepPrune, cols: i32, rows: i32, spacing: i32, size: i32) -> Vec<ProxyId> {
    let mut ids = Vec::new();
    for j in 0..rows {
        for i in 0..cols {
            let id = sap
                .add(
                    Aabb::new(i * spacing, j * spacing, size, size),
                    GROUP,
                    GROUP,
                    true,
                )
                .expect("add failed");
            ids.push(id);
        }
    }
    ids
}

fn add_remove_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut sap = SweepPrune::with_config(Config {
        max_entities: 4096,
        max_overlaps: 65_536,
    });
    build_grid(&mut sap, 40, 25, 30, 10);

    c.bench_function("sap_add_remove", |b| {
        b.iter(|| {
            let aabb = Aabb::new(
                rng.gen_range(0..1200),
                rng.gen_range(0..750),
                10,
                10,
            );
            let id = sap.add(black_box(aabb), GROUP, GROUP, true).unwrap();
            if id.is_valid() {
                sap.remove(id).unwrap();
            }
        })
    });
}

fn coherent_update_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut sap = SweepPrune::with_config(Config {
        max_entities: 4096,
        max_overlaps: 65_536,
    });
    let ids = build_grid(&mut sap, 40, 25, 15, 12);
    let homes: Vec<(i32, i32)> = (0..25)
        .flat_map(|j| (0..40).map(move |i| (i * 15, j * 15)))
        .collect();
    // entities oscillate around their grid homes; the bound keeps every
    // entity's overlap count well inside its slot cap
    let mut offsets = vec![(0i32, 0i32); homes.len()];

    c.bench_function("sap_coherent_update", |b| {
        b.iter(|| {
            for (k, &id) in ids.iter().enumerate() {
                let (ox, oy) = offsets[k];
                let ox = (ox + rng.gen_range(-2..=2)).clamp(-6, 6);
                let oy = (oy + rng.gen_range(-2..=2)).clamp(-6, 6);
                offsets[k] = (ox, oy);
                let (hx, hy) = homes[k];
                sap.update(id, black_box(Aabb::new(hx + ox, hy + oy, 12, 12)))
                    .unwrap();
            }
        })
    });
}

fn pairs_drain_benchmark(c: &mut Criterion) {
    let mut sap = SweepPrune::with_config(Config {
        max_entities: 4096,
        max_overlaps: 65_536,
    });
    build_grid(&mut sap, 40, 25, 10, 12);

    c.bench_function("sap_pairs_drain", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for pair in sap.pairs() {
                if sap.test_entities_overlap(pair.first_id(), pair.second_id()) {
                    sum += 1;
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(
    benches,
    add_remove_benchmark,
    coherent_update_benchmark,
    pairs_drain_benchmark
);
criterion_main!(benches);
