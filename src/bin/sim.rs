use anyhow::{anyhow, bail};
use clap::{Parser, ValueEnum};
use hawkins_battleship::ranking::calculate_score;
use hawkins_battleship::{
    init_logging, Fleet, GameConfig, MatchController, PlacementStrategy, Player, Targeting,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FleetArg {
    Classic,
    Hawkins,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlacementArg {
    Fixed,
    Random,
}

/// Play one automated match against the computer and print the summary as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FleetArg::Classic)]
    fleet: FleetArg,
    #[arg(long, value_enum, default_value_t = PlacementArg::Random)]
    human_placement: PlacementArg,
    #[arg(long, default_value_t = 500)]
    max_turns: u32,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let config = GameConfig {
        fleet: match cli.fleet {
            FleetArg::Classic => Fleet::Classic,
            FleetArg::Hawkins => Fleet::Hawkins,
        },
        human_placement: match cli.human_placement {
            PlacementArg::Fixed => PlacementStrategy::Fixed,
            PlacementArg::Random => PlacementStrategy::Random,
        },
        ..GameConfig::default()
    };
    log::info!("seed {}", seed);

    let mut controller = MatchController::with_seed(&config, seed)?;
    let mut gunner = Targeting::new();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    while !controller.finished() {
        if controller.game().turn() >= cli.max_turns {
            bail!("no winner after {} turns", cli.max_turns);
        }

        let (row, col) = gunner
            .next_target(&mut rng)
            .ok_or_else(|| anyhow!("human side ran out of cells"))?;
        let report = controller.process_player_attack(row, col)?;
        let outcome = controller
            .game()
            .history()
            .last()
            .map(|r| r.outcome)
            .ok_or_else(|| anyhow!("attack left no history"))?;
        gunner.record((row, col), outcome, report.ship_destroyed);
        log::debug!("{}", report.message);
        if report.game_over {
            break;
        }
        controller.switch_turn()?;

        let reply = controller.process_computer_attack()?;
        log::debug!("{}", reply.message);
        if reply.game_over {
            break;
        }
        controller.switch_turn()?;
    }

    log::debug!("{} board:\n{}", controller.player().name(), controller.player().board());
    log::debug!("{} board:\n{}", controller.computer().name(), controller.computer().board());

    let summary = controller
        .end_of_match_summary()
        .ok_or_else(|| anyhow!("match ended without a winner"))?;
    let score = calculate_score(
        summary.won,
        summary.turns,
        summary.ships_remaining,
        summary.accuracy,
    );
    let result = json!({
        "seed": seed,
        "winner": controller.get_game_status().winner,
        "summary": summary,
        "score": score,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
