use std::fmt::Write as _;

use crate::combat::{BattleReport, Fleet};

fn write_fleet(out: &mut String, label: &str, fleet: &Fleet) {
    let _ = writeln!(out, "{label}:");
    if fleet.iter().next().is_none() {
        let _ = writeln!(out, "  (none)");
    }
    for (ship, count) in fleet.iter() {
        let _ = writeln!(out, "  {ship} {count}");
    }
}

/// Plain-text battle report: start, one block per round, then the winner line.
pub fn render_report(report: &BattleReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "A battle took place:");

    let _ = writeln!(out, "Start:");
    write_fleet(&mut out, "Attacker", &report.start.attacker);
    write_fleet(&mut out, "Defender", &report.start.defender);

    for round in &report.rounds {
        let _ = writeln!(out, "Round {}", round.round);
        write_fleet(&mut out, "Attacker", &round.attacker);
        write_fleet(&mut out, "Defender", &round.defender);
    }

    let _ = writeln!(
        out,
        "Winner: {} after {} rounds",
        report.winner,
        report.rounds_fought()
    );
    out
}
