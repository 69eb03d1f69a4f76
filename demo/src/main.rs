use broadphase::sap::{Config, ProxyId, SweepPrune};
use collisions::disc_disc_intersect;
use common::shapes::{Aabb, Disc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::env;
use std::time::{Duration, Instant};

// Sparse enough that no disc comes near its overlap-slot cap.
const NUM_ENTITIES: usize = 1000;
const DEFAULT_FRAMES: usize = 600;
const SEED: u64 = 0xD15C;

/// Logical coordinates carry 3 fractional bits (8 subpixels per pixel).
const SUBPIXEL_BITS: i32 = 3;

/// Arena size in pixels.
const ARENA_WIDTH: i32 = 4000;
const ARENA_HEIGHT: i32 = 3000;

const COL_NORMAL: u16 = 0x01;

/// Spawn table: (share of population, disc radius in pixels, velocity in
/// pixels per frame). The remainder after the first three classes spawns as
/// the last.
const SIZE_CLASSES: [(f32, i32, i32); 4] = [
    (0.30, 5, 30),
    (0.40, 10, 30),
    (0.27, 25, 20),
    (1.00, 40, 20),
];

struct GameEntity {
    id: ProxyId,
    /// AABB origin in subpixels.
    x: i32,
    y: i32,
    /// AABB extent in subpixels (discs, so width == height).
    size: i32,
    /// Velocity in subpixels per frame.
    vx: i32,
    vy: i32,
}

impl GameEntity {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }
}

fn spawn_entities(sap: &mut SweepPrune, rng: &mut StdRng) -> Vec<GameEntity> {
    let arena = Aabb::new(0, 0, ARENA_WIDTH, ARENA_HEIGHT);
    let mut entities = Vec::with_capacity(NUM_ENTITIES);
    for &(share, radius, velocity) in SIZE_CLASSES.iter() {
        let count = ((share * NUM_ENTITIES as f32) as usize).min(NUM_ENTITIES - entities.len());
        for _ in 0..count {
            let frame = radius * 2;
            let (px, py) = arena.random_origin_inside(frame, frame, rng);

            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = (velocity << SUBPIXEL_BITS) as f32;
            let vx = (angle.cos() * speed) as i32;
            let vy = (angle.sin() * speed) as i32;

            let entity = GameEntity {
                id: ProxyId::INVALID,
                x: px << SUBPIXEL_BITS,
                y: py << SUBPIXEL_BITS,
                size: frame << SUBPIXEL_BITS,
                vx,
                vy,
            };
            entities.push(entity);
        }
    }

    // entities enter all at once here, so the initial overlap set is wanted
    for entity in entities.iter_mut() {
        entity.id = sap
            .add(entity.aabb(), COL_NORMAL, COL_NORMAL, true)
            .expect("broadphase rejected spawn");
        assert!(entity.id.is_valid());
    }
    entities
}

fn update_motion(entities: &mut [GameEntity]) {
    for entity in entities.iter_mut() {
        entity.x += entity.vx;
        entity.y += entity.vy;
    }
}

/// Reflect any entity whose center left the arena, undoing the penetration.
fn bounce_off_walls(entities: &mut [GameEntity]) {
    for entity in entities.iter_mut() {
        let cx = (entity.x + entity.size / 2) >> SUBPIXEL_BITS;
        let cy = (entity.y + entity.size / 2) >> SUBPIXEL_BITS;
        if cx < 0 {
            entity.x -= cx << SUBPIXEL_BITS;
            entity.vx = -entity.vx;
        } else if cx > ARENA_WIDTH {
            entity.x -= (cx - ARENA_WIDTH) << SUBPIXEL_BITS;
            entity.vx = -entity.vx;
        }
        if cy < 0 {
            entity.y -= cy << SUBPIXEL_BITS;
            entity.vy = -entity.vy;
        } else if cy > ARENA_HEIGHT {
            entity.y -= (cy - ARENA_HEIGHT) << SUBPIXEL_BITS;
            entity.vy = -entity.vy;
        }
    }
}

/// Narrow phase over the broadphase's pair set: disc-vs-disc on the discs
/// reconstructed from the square AABBs. Flags live in a parallel array owned
/// here, not in the broadphase.
fn resolve_collisions(
    sap: &SweepPrune,
    slot_of: &HashMap<ProxyId, usize>,
    nearphase: &mut [bool],
) -> usize {
    let mut hits = 0;
    for pair in sap.pairs() {
        let a = sap.aabb(pair.first_id()).expect("pair with stale handle");
        let b = sap.aabb(pair.second_id()).expect("pair with stale handle");
        if disc_disc_intersect(&Disc::from_aabb(&a), &Disc::from_aabb(&b)) {
            for id in [pair.first_id(), pair.second_id()] {
                let slot = slot_of[&id];
                if !nearphase[slot] {
                    nearphase[slot] = true;
                    hits += 1;
                }
            }
        }
    }
    hits
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn main() {
    let frames: usize = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut sap = SweepPrune::with_config(Config {
        max_entities: NUM_ENTITIES,
        max_overlaps: NUM_ENTITIES * 16,
    });

    let mut entities = spawn_entities(&mut sap, &mut rng);
    let slot_of: HashMap<ProxyId, usize> = entities
        .iter()
        .enumerate()
        .map(|(slot, entity)| (entity.id, slot))
        .collect();
    let mut nearphase = vec![false; entities.len()];

    println!(
        "{} discs in a {}x{} arena, {} frames",
        entities.len(),
        ARENA_WIDTH,
        ARENA_HEIGHT,
        frames
    );

    let mut update_total = Duration::ZERO;
    let mut nearphase_total = Duration::ZERO;
    let mut frames_this_second = 0usize;
    let mut last_report = Instant::now();

    for frame in 0..frames {
        update_motion(&mut entities);

        let start = Instant::now();
        for entity in entities.iter() {
            sap.update(entity.id, entity.aabb())
                .expect("broadphase update failed");
        }
        update_total += start.elapsed();

        let start = Instant::now();
        let hits = resolve_collisions(&sap, &slot_of, &mut nearphase);
        nearphase_total += start.elapsed();

        bounce_off_walls(&mut entities);
        for flag in nearphase.iter_mut() {
            *flag = false;
        }

        frames_this_second += 1;
        if last_report.elapsed() >= Duration::from_secs(1) || frame + 1 == frames {
            println!(
                "frame {:>5}: {} fps, {} pairs, {} discs touching",
                frame + 1,
                frames_this_second,
                sap.pairs_count(),
                hits
            );
            frames_this_second = 0;
            last_report = Instant::now();
        }
    }

    println!(
        "broadphase update: {:.3}ms/frame, narrow phase: {:.3}ms/frame",
        duration_ms(update_total) / frames as f64,
        duration_ms(nearphase_total) / frames as f64
    );
}
