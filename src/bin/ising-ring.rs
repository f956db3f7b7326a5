//! Ising ring CLI.
//!
//! Runs the populate phase, then pulses the trigger while idle and prints
//! one line per completed sweep.
//!
//! Usage:
//!   cargo run --features cli --bin ising-ring -- --sweeps 32 --seed 0x1234abcd

use anyhow::{Context, Result};
use clap::Parser;
use ising_ring::{Phase, RingConfig, Sequencer, TriggerSchedule, TriggerSource};

/// Clocked 16-spin Ising ring simulator.
#[derive(Parser)]
#[command(name = "ising-ring", about = "Run sweeps of a 16-spin Ising ring")]
struct Cli {
    /// LFSR seed (hex, 31 bits, not zero or all-ones).
    #[arg(long, value_parser = parse_hex, default_value = "0x5a5a5a5a")]
    seed: u32,

    /// Number of sweeps to run.
    #[arg(long, default_value_t = 16)]
    sweeps: u64,

    /// Ticks between trigger pulses.
    #[arg(long, default_value_t = 1)]
    gap: u64,

    /// Print the committed ring after every tick, not just per sweep.
    #[arg(long)]
    every_tick: bool,
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex seed {s:?}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RingConfig::new(cli.seed);
    let mut seq = Sequencer::new(config).context("invalid ring configuration")?;

    let populate_ticks = seq.populate();
    tracing::info!(
        seed = %format!("{:#x}", cli.seed),
        ticks = populate_ticks,
        "ring populated"
    );
    print_line("seed", &seq);

    let mut triggers = TriggerSchedule::periodic(seq.tick_count(), cli.gap);
    while seq.sweeps_completed() < cli.sweeps {
        let trigger = seq.phase() == Phase::AwaitTrigger && triggers.sample(seq.tick_count());
        let before = seq.sweeps_completed();
        seq.tick(trigger);

        if cli.every_tick {
            print_line(&format!("t{}", seq.tick_count()), &seq);
        } else if seq.sweeps_completed() != before {
            print_line(&format!("#{}", seq.sweeps_completed()), &seq);
        }
    }

    tracing::info!(
        sweeps = seq.sweeps_completed(),
        ticks = seq.tick_count(),
        "done"
    );
    Ok(())
}

fn print_line(label: &str, seq: &Sequencer) {
    let ring = seq.ring();
    println!(
        "{:>8} {:016b} {} m={:+3} e={:2}",
        label,
        ring.snapshot().reverse_bits(),
        ring,
        ring.magnetization(),
        ring.bond_energy(),
    );
}
