//! Win-odds estimation by repeated battles.
//!
//! Trial `i` is seeded with `seed.wrapping_add(i)`, so sequential and parallel
//! runs with the same seed produce identical summaries regardless of the
//! number of worker threads.

use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{BattleCalculator, BattleReport, Fleet, ShipSpecProvider, Winner};
use crate::error::Result;
use crate::parallel::{batches_for_workers, WorkerPool};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsSummary {
    pub trials: u64,
    pub attacker_wins: u64,
    pub defender_wins: u64,
    pub draws: u64,
    pub attacker_win_rate: f64,
    pub defender_win_rate: f64,
    pub draw_rate: f64,
    /// Mean number of rounds fought per battle.
    pub avg_rounds: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    attacker_wins: u64,
    defender_wins: u64,
    draws: u64,
    rounds: u64,
}

impl Tally {
    fn record(&mut self, report: &BattleReport) {
        match report.winner {
            Winner::Attacker => self.attacker_wins += 1,
            Winner::Defender => self.defender_wins += 1,
            Winner::Draw => self.draws += 1,
        }
        self.rounds += report.rounds_fought() as u64;
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            attacker_wins: self.attacker_wins + other.attacker_wins,
            defender_wins: self.defender_wins + other.defender_wins,
            draws: self.draws + other.draws,
            rounds: self.rounds + other.rounds,
        }
    }

    fn trials(&self) -> u64 {
        self.attacker_wins + self.defender_wins + self.draws
    }

    fn summary(self) -> OddsSummary {
        let trials = self.trials();
        let rate = |n: u64| if trials == 0 { 0.0 } else { n as f64 / trials as f64 };
        OddsSummary {
            trials,
            attacker_wins: self.attacker_wins,
            defender_wins: self.defender_wins,
            draws: self.draws,
            attacker_win_rate: rate(self.attacker_wins),
            defender_win_rate: rate(self.defender_wins),
            draw_rate: rate(self.draws),
            avg_rounds: rate(self.rounds),
        }
    }
}

fn run_range<P: ShipSpecProvider>(
    calculator: &BattleCalculator<P>,
    attacker: &Fleet,
    defender: &Fleet,
    trials: Range<usize>,
    seed: u64,
) -> Result<Tally> {
    let mut tally = Tally::default();
    for trial in trials {
        let trial_seed = seed.wrapping_add(trial as u64);
        let report = calculator.calculate_seeded(attacker, defender, trial_seed)?;
        tally.record(&report);
    }
    Ok(tally)
}

/// Run `trials` battles on the calling thread.
pub fn estimate_odds<P: ShipSpecProvider>(
    calculator: &BattleCalculator<P>,
    attacker: &Fleet,
    defender: &Fleet,
    trials: usize,
    seed: u64,
) -> Result<OddsSummary> {
    let tally = run_range(calculator, attacker, defender, 0..trials, seed)?;
    Ok(tally.summary())
}

/// Like [estimate_odds] but spreads the trials across `pool`.
pub fn estimate_odds_parallel<P: ShipSpecProvider + Sync>(
    calculator: &BattleCalculator<P>,
    attacker: &Fleet,
    defender: &Fleet,
    trials: usize,
    seed: u64,
    pool: &WorkerPool,
) -> Result<OddsSummary> {
    let tallies = pool.install(|| {
        batches_for_workers(trials, rayon::current_num_threads())
            .into_par_iter()
            .map(|range| run_range(calculator, attacker, defender, range, seed))
            .collect::<Result<Vec<Tally>>>()
    })?;

    let tally = tallies.into_iter().fold(Tally::default(), Tally::merge);
    tracing::debug!(trials, attacker_wins = tally.attacker_wins, "odds estimated");
    Ok(tally.summary())
}
