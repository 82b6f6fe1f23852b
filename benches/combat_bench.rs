//! Combat and movement benchmarks
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use squad_tactics::battlefield::{Battlefield, TerrainKind};
use squad_tactics::combat::resolve_combat;
use squad_tactics::core::config::GameConfig;
use squad_tactics::core::dice::GameRng;
use squad_tactics::core::types::{Color, GridPos};
use squad_tactics::movement::MovementPlanner;
use squad_tactics::squad::Squad;
use squad_tactics::units::{Archetype, Unit};

fn full_squad(color: Color, archetype: Archetype, seed: u64) -> Squad {
    let mut rng = GameRng::seed_from_u64(seed);
    let mut squad = Squad::new(GridPos::new(10, 10), color);
    for _ in 0..9 {
        squad.add_unit(Unit::create(archetype, 5, &mut rng));
    }
    squad
}

fn bench_combat(c: &mut Criterion) {
    let mut group = c.benchmark_group("combat");

    group.bench_function("nine_vs_nine", |b| {
        let attacker = full_squad(Color(200, 60, 60), Archetype::Knight, 1);
        let defender = full_squad(Color(60, 60, 200), Archetype::Mage, 2);
        let mut rng = GameRng::seed_from_u64(3);
        b.iter_batched(
            || (attacker.clone(), defender.clone()),
            |(mut a, mut d)| black_box(resolve_combat(&mut a, &mut d, 0.25, &mut rng)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_movement(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement");

    let uniform = Battlefield::uniform(100, TerrainKind::Plains);
    let config = GameConfig::default();
    let generated = Battlefield::generate(&config, &mut GameRng::seed_from_u64(4));
    let squads: Vec<Squad> = Vec::new();

    group.bench_function("reachable_plains_move_5", |b| {
        let planner = MovementPlanner::new(&uniform, squads.as_slice());
        b.iter(|| black_box(planner.reachable_from(GridPos::new(50, 50), 5)));
    });

    group.bench_function("reachable_mixed_terrain_move_5", |b| {
        let planner = MovementPlanner::new(&generated, squads.as_slice());
        b.iter(|| black_box(planner.reachable_from(GridPos::new(50, 50), 5)));
    });

    group.finish();
}

criterion_group!(benches, bench_combat, bench_movement);
criterion_main!(benches);
