use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use territory_sim::analytics::{FactionSeries, Metric};
use territory_sim::display::{render_board, render_summary};
use territory_sim::sim::rules::{DEFAULT_BOARD_SIZE, DEFAULT_FACTIONS};
use territory_sim::{SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "territory-sim")]
#[command(about = "Watch factions grow, expand and fight over a square board")]
struct Cli {
    /// Side length of the board (10-100)
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Number of factions (2 to size²/10)
    #[arg(short, long, default_value_t = DEFAULT_FACTIONS)]
    factions: usize,

    /// Seconds to pause between turns (0-60)
    #[arg(short, long, default_value_t = 0.0)]
    turn_delay: f64,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns even without a single winner
    #[arg(long)]
    max_turns: Option<u32>,

    /// Write turns.jsonl and battles.jsonl into this directory when the run ends
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the board without ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Skip the per-turn board and faction listing
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = SimConfig::new(cli.size, cli.factions).with_turn_delay(cli.turn_delay);
    config.seed = cli.seed;
    config.max_turns = cli.max_turns;
    config.output_dir = cli.output_dir;

    let mut sim = Simulation::new(config)?;
    let colored = !cli.no_color;
    let quiet = cli.quiet;
    sim.run(|world| {
        if quiet {
            return;
        }
        println!("\n===== Turn {} =====", world.turn);
        print!("{}", render_board(&world.grid, colored));
        print!("{}", render_summary(&world.factions));
    })?;

    let world = sim.world();
    match sim.survivor() {
        Some(id) => println!("\nFaction {id} wins after {} turns (seed {}).", world.turn, sim.seed()),
        None => println!(
            "\nNo single winner after {} turns, {} factions left (seed {}).",
            world.turn,
            world.alive_count(),
            sim.seed()
        ),
    }
    println!("{} battles fought.", world.battle_log.len());

    let series = FactionSeries::from_records(&world.turn_records);
    let last_alive = series.last_turn_alive();
    println!("\nfaction  last_turn  {}", Metric::ALL.map(|m| format!("peak_{m}")).join("  "));
    let peaks = Metric::ALL.map(|m| series.peak(m));
    for id in series.factions() {
        let values: Vec<String> = peaks
            .iter()
            .map(|p| format!("{:.0}", p.get(&id).copied().unwrap_or(0.0)))
            .collect();
        println!(
            "{id:>7}  {:>9}  {}",
            last_alive.get(&id).copied().unwrap_or(0),
            values.join("  ")
        );
    }
    Ok(())
}
