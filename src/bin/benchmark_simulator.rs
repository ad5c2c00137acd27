//! Run the battle calculator repeatedly and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, battles_per_sec, battles_per_min, rounds_per_sec, ships_per_battle).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use fleetsim::combat::{BattleCalculator, Fleet, ShipType};

// Run for at least this long or this many battles
const MIN_DURATION_MS: u128 = 2000;
const MIN_BATTLES: u32 = 200;

fn main() -> std::io::Result<()> {
    let log = std::env::args().any(|a| a == "--log");

    let attacker = Fleet::new()
        .with(ShipType::HeavyFighter, 1_000)
        .with(ShipType::BattleShip, 50)
        .with(ShipType::SmallTransporter, 100);
    let defender = Fleet::new()
        .with(ShipType::LightFighter, 2_000)
        .with(ShipType::LargeTransporter, 200)
        .with(ShipType::BattleShip, 40);
    let ships_per_battle = attacker.total() + defender.total();
    let calculator = BattleCalculator::standard();

    let start = Instant::now();
    let mut battles: u32 = 0;
    let mut rounds: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || battles < MIN_BATTLES {
        match calculator.calculate_seeded(&attacker, &defender, u64::from(battles)) {
            Ok(report) => rounds += report.rounds_fought() as u64,
            Err(err) => {
                eprintln!("battle failed: {err}");
                std::process::exit(1);
            }
        }
        battles += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let battles_per_sec = battles as f64 / elapsed_secs;
    let battles_per_min = battles_per_sec * 60.0;
    let rounds_per_sec = rounds as f64 / elapsed_secs;

    println!("Battle calculator benchmark ({ships_per_battle} ships/battle):");
    println!("  Battles:     {}", battles);
    println!("  Duration:    {:.2} s", elapsed_secs);
    println!("  Battles/s:   {:.2}", battles_per_sec);
    println!("  Battles/min: {:.2}", battles_per_min);
    println!("  Rounds/s:    {:.2}", rounds_per_sec);

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{:.4},{:.4},{}\n",
            date, battles_per_sec, battles_per_min, rounds_per_sec, ships_per_battle
        );
        let path = "benchmark_log.csv";
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            file.write_all(b"date,battles_per_sec,battles_per_min,rounds_per_sec,ships_per_battle\n")?;
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;
        println!("Appended to {}", path);
    }

    Ok(())
}
