//! CSV export of per-round fleet counts. Round 0 is the starting snapshot.
//!
//! Columns: `round,side,ship_type,count`.

use serde::Serialize;

use crate::combat::{BattleReport, Fleet};
use crate::error::{BattleError, Result};

#[derive(Debug, Serialize)]
struct CountRow<'a> {
    round: u32,
    side: &'a str,
    ship_type: &'a str,
    count: u64,
}

fn write_fleet<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    round: u32,
    side: &str,
    fleet: &Fleet,
) -> Result<()> {
    for (ship, count) in fleet.iter() {
        writer.serialize(CountRow {
            round,
            side,
            ship_type: ship.as_str(),
            count,
        })?;
    }
    Ok(())
}

pub fn report_to_csv(report: &BattleReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    write_fleet(&mut writer, 0, "attacker", &report.start.attacker)?;
    write_fleet(&mut writer, 0, "defender", &report.start.defender)?;
    for round in &report.rounds {
        write_fleet(&mut writer, round.round, "attacker", &round.attacker)?;
        write_fleet(&mut writer, round.round, "defender", &round.defender)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| BattleError::Io(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| BattleError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}
