//! Ship base specs: the built-in table and file-backed tables (YAML or JSON).
//! File tables are keyed by ship type name, e.g.
//!
//! ```yaml
//! light_fighter: { hull: 750, shields: 100, weapons: 1000 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::{ShipSpecProvider, ShipSpecs, ShipType};
use crate::error::{BattleError, Result};

pub const DEFAULT_SPECS_PATH: &str = "data/ships.yaml";

/// The standard ship table. Total over [ShipType].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSpecs;

impl StandardSpecs {
    pub const fn lookup(ship: ShipType) -> ShipSpecs {
        match ship {
            ShipType::BattleShip => ShipSpecs::new(10_000.0, 5_000.0, 2_500.0),
            ShipType::LightFighter => ShipSpecs::new(750.0, 100.0, 1_000.0),
            ShipType::HeavyFighter => ShipSpecs::new(1_000.0, 250.0, 1_500.0),
            ShipType::SmallTransporter => ShipSpecs::new(750.0, 250.0, 100.0),
            ShipType::LargeTransporter => ShipSpecs::new(2_000.0, 1_500.0, 200.0),
            ShipType::Mothership => ShipSpecs::new(1_000_000.0, 250_000.0, 100_000.0),
        }
    }

    pub fn table() -> SpecTable {
        ShipType::ALL
            .into_iter()
            .map(|ship| (ship, Self::lookup(ship)))
            .collect()
    }
}

impl ShipSpecProvider for StandardSpecs {
    fn specs(&self, ship: ShipType) -> Option<ShipSpecs> {
        Some(Self::lookup(ship))
    }
}

/// Map-backed spec table, usually loaded from disk. May be partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecTable(BTreeMap<ShipType, ShipSpecs>);

impl SpecTable {
    pub fn get(&self, ship: ShipType) -> Option<&ShipSpecs> {
        self.0.get(&ship)
    }

    pub fn insert(&mut self, ship: ShipType, specs: ShipSpecs) {
        self.0.insert(ship, specs);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipType, &ShipSpecs)> + '_ {
        self.0.iter().map(|(ship, specs)| (*ship, specs))
    }

    pub fn missing_types(&self) -> Vec<ShipType> {
        ShipType::ALL
            .into_iter()
            .filter(|ship| !self.0.contains_key(ship))
            .collect()
    }
}

impl FromIterator<(ShipType, ShipSpecs)> for SpecTable {
    fn from_iter<I: IntoIterator<Item = (ShipType, ShipSpecs)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ShipSpecProvider for SpecTable {
    fn specs(&self, ship: ShipType) -> Option<ShipSpecs> {
        self.0.get(&ship).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Json,
    Yaml,
}

fn format_for(path: &Path) -> Result<TableFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "json" => Ok(TableFormat::Json),
        "yaml" | "yml" => Ok(TableFormat::Yaml),
        _ => Err(BattleError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load a spec table, picking the parser from the file extension.
pub fn load_spec_table(path: impl AsRef<Path>) -> Result<SpecTable> {
    let path = path.as_ref();
    let format = format_for(path)?;
    let raw = fs::read_to_string(path)?;
    let table = match format {
        TableFormat::Json => serde_json::from_str(&raw)?,
        TableFormat::Yaml => serde_yaml::from_str(&raw)?,
    };
    tracing::debug!(path = %path.display(), "loaded spec table");
    Ok(table)
}
