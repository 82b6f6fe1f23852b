//! Squad Tactics - headless skirmish runner
//!
//! Every squad attacks an adjacent enemy when it can, otherwise marches
//! toward the nearest one. Ready units promote into their first option.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use squad_tactics::core::config::GameConfig;
use squad_tactics::core::error::Result;
use squad_tactics::core::types::GridPos;
use squad_tactics::game::{GameState, MoveOutcome};

#[derive(Parser, Debug)]
#[command(name = "squad-tactics")]
#[command(about = "Run a headless squad skirmish")]
struct Args {
    /// Random seed for map and rolls (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns to play
    #[arg(long, default_value_t = 30)]
    turns: u32,

    /// Game config (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Write a save game here when the skirmish ends
    #[arg(long)]
    save: Option<String>,

    /// Resume from a save game instead of deploying new squads
    #[arg(long)]
    load: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("squad_tactics=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut state = match &args.load {
        Some(path) => GameState::load_from_file(config, path)?,
        None => GameState::new(config)?,
    };

    println!("\n=== SQUAD TACTICS ===");
    println!("Map seed: {}", state.map_seed());
    print_roster(&state);

    let last_turn = state.current_turn() + args.turns;
    while state.current_turn() < last_turn && !state.is_over() {
        play_turn(&mut state)?;
        state.end_turn();
    }

    println!("\n=== FINAL STATE (turn {}) ===", state.current_turn());
    print_roster(&state);

    println!("\nRecent combat:");
    let log = state.combat_log();
    for line in &log[log.len().saturating_sub(10)..] {
        println!("{}", line);
    }

    if let Some(path) = &args.save {
        state.save_to_file(path)?;
        println!("\nSaved to {}", path);
    }

    Ok(())
}

fn play_turn(state: &mut GameState) -> Result<()> {
    for index in 0..state.squads().len() {
        promote_ready_units(state, index)?;

        let squad = state.squad(index)?;
        if !squad.is_alive() || squad.has_acted {
            continue;
        }
        let Some((leader_pos, _)) = squad.leader_position() else {
            continue;
        };

        let reachable = state.movement_range(leader_pos);
        let target = state.attack_tiles().iter().next().copied();
        if let Some(target) = target {
            if let MoveOutcome::Attacked(report) = state.move_squad(index, target)? {
                for line in report.lines() {
                    println!("{}", line);
                }
            }
            continue;
        }

        let Some(goal) = nearest_enemy(state, index, leader_pos) else {
            continue;
        };
        let step = reachable
            .iter()
            .min_by_key(|pos| (pos.distance(&goal), **pos))
            .copied();
        if let Some(dest) = step {
            if dest.distance(&goal) < leader_pos.distance(&goal) {
                state.move_squad(index, dest)?;
            }
        }
    }
    Ok(())
}

fn promote_ready_units(state: &mut GameState, index: usize) -> Result<()> {
    let ready: Vec<_> = state
        .squad(index)?
        .living_units()
        .filter_map(|u| u.promotion_options().first().map(|&target| (u.id(), target)))
        .collect();

    for (id, target) in ready {
        if state.promote_unit_if_eligible(index, id, target)? {
            println!("  A unit of {} promoted to {}", state.squad(index)?.name, target);
        }
    }
    Ok(())
}

fn nearest_enemy(state: &GameState, index: usize, from: GridPos) -> Option<GridPos> {
    state
        .hostile_squads(index)
        .into_iter()
        .filter_map(|i| state.squads().get(i))
        .flat_map(|squad| squad.unit_positions().into_iter().map(|(pos, _)| pos))
        .min_by_key(|pos| (pos.distance(&from), *pos))
}

fn print_roster(state: &GameState) {
    for squad in state.squads() {
        println!("\n{}", squad);
        for unit in squad.living_units() {
            println!("  {}", unit);
        }
    }
}
