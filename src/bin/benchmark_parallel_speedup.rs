//! Estimate battle odds once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup [trials]

use std::time::Instant;

use fleetsim::combat::{BattleCalculator, Fleet, ShipType};
use fleetsim::monte_carlo::{estimate_odds, estimate_odds_parallel};
use fleetsim::parallel::WorkerPool;

fn main() {
    let trials = std::env::args()
        .nth(1)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(2_000);
    let seed = 12345u64;

    let attacker = Fleet::new()
        .with(ShipType::HeavyFighter, 300)
        .with(ShipType::SmallTransporter, 30);
    let defender = Fleet::new()
        .with(ShipType::LightFighter, 500)
        .with(ShipType::LargeTransporter, 40);
    let calculator = BattleCalculator::standard();

    println!(
        "Odds estimation: {} trials, {} threads",
        trials,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let sequential = match estimate_odds(&calculator, &attacker, &defender, trials, seed) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("sequential run failed: {err}");
            std::process::exit(1);
        }
    };
    let seq_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let pool = WorkerPool::default_workers();
    let estimate = estimate_odds_parallel(&calculator, &attacker, &defender, trials, seed, &pool);
    let parallel = match estimate {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("parallel run failed: {err}");
            std::process::exit(1);
        }
    };
    let par_secs = start.elapsed().as_secs_f64();

    println!("  Sequential: {:.3} s", seq_secs);
    println!("  Parallel:   {:.3} s", par_secs);
    if par_secs > 0.0 {
        println!("  Speedup:    {:.2}x", seq_secs / par_secs);
    }
    println!(
        "  Attacker win rate: {:.4} (results match: {})",
        parallel.attacker_win_rate,
        sequential == parallel
    );
}
