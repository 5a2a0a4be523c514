use std::path::PathBuf;

use clap::Parser;
use game_interface::types::input::CharacterInput;
use math::math::{vector::vec2, Rng};
use vanilla::{collision::collision::Collision, state::state::GameState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with the game config, defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Amount of ticks to simulate
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,
    /// Amount of characters to spawn
    #[arg(long, default_value_t = 4)]
    characters: usize,
    /// Seed of the random input
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Log a snapshot every n ticks, 0 disables it
    #[arg(long, default_value_t = 50)]
    snapshot_interval: u64,
}

const DEMO_MAP: [&str; 16] = [
    "##############################",
    "#............................#",
    "#............................#",
    "#.......####.......nnnn......#",
    "#............................#",
    "#............................#",
    "#...............#............#",
    "#..nnnn.........#.......###..#",
    "#...............#............#",
    "#............................#",
    "#.........#######............#",
    "#............................#",
    "#............................#",
    "#............................#",
    "#xxxxx.......................#",
    "##############################",
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = args.config.map(std::fs::read).transpose()?;
    let collision = Collision::from_ascii(32.0, &DEMO_MAP)?;
    let mut game = GameState::new_from_json(Box::new(collision), config.as_deref())?;

    let mut rng = Rng::new(args.seed);
    let ids = (0..args.characters)
        .map(|index| game.spawn_character(vec2::new(64.0 + index as f64 * 48.0, 64.0)))
        .collect::<Result<Vec<_>, _>>()?;

    for _ in 0..args.ticks {
        for id in &ids {
            let inp = CharacterInput {
                dir: rng.random_int_in(0..=2) as i32 - 1,
                cursor: vec2::new(
                    rng.random_float_in(-1.0, 1.0),
                    rng.random_float_in(-1.0, 1.0),
                ),
                jump: rng.random_int_in(0..=3) == 0,
                hook: rng.random_int_in(0..=1) != 0,
                fire: false,
            };
            game.set_input(id, inp)?;
        }
        game.tick();

        if args.snapshot_interval != 0 && game.tick_count() % args.snapshot_interval == 0 {
            log::info!(
                target: "world",
                "{}",
                serde_json::to_string(&game.snapshot())?
            );
        }
    }

    for snap in game.snapshots() {
        println!(
            "character {}: pos ({:.2}, {:.2}) vel ({:.2}, {:.2}) hook {:?}",
            snap.id, snap.pos.x, snap.pos.y, snap.vel.x, snap.vel.y, snap.hook_state
        );
    }
    Ok(())
}
