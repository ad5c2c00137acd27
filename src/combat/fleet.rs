//! Fleet representations: aggregate counts for input/output and per-ship
//! instances for the duration of a battle.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::ship::{ShipInstance, ShipSpecProvider, ShipType};
use crate::error::{BattleError, Result};

/// Count form: ship type -> number of ships. Absent types count as zero;
/// types present with a zero count are kept so snapshots list them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet(BTreeMap<ShipType, u64>);

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and benches.
    pub fn with(mut self, ship: ShipType, count: u64) -> Self {
        self.set(ship, count);
        self
    }

    pub fn set(&mut self, ship: ShipType, count: u64) {
        self.0.insert(ship, count);
    }

    pub fn count(&self, ship: ShipType) -> u64 {
        self.0.get(&ship).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipType, u64)> + '_ {
        self.0.iter().map(|(ship, count)| (*ship, *count))
    }

    pub fn ship_types(&self) -> impl Iterator<Item = ShipType> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(ShipType, u64)> for Fleet {
    fn from_iter<I: IntoIterator<Item = (ShipType, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses `type=count[,type=count...]`. Repeated types are summed.
/// An empty expression is an empty fleet.
impl FromStr for Fleet {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self> {
        let mut fleet = Fleet::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, raw_count)) = part.split_once('=') else {
                return Err(BattleError::InvalidFleet(format!(
                    "expected 'type=count', got '{part}'"
                )));
            };
            let ship: ShipType = name.parse()?;
            let raw_count = raw_count.trim();
            if raw_count.starts_with('-') {
                return Err(BattleError::InvalidFleet(format!(
                    "negative count '{raw_count}' for {ship}"
                )));
            }
            let count = raw_count.parse::<u64>().map_err(|_| {
                BattleError::InvalidFleet(format!("invalid count '{raw_count}' for {ship}"))
            })?;
            let total = fleet.count(ship).saturating_add(count);
            fleet.set(ship, total);
        }
        Ok(fleet)
    }
}

/// Instance form: ship type -> surviving ships of that type. Instance order
/// carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetInstances(BTreeMap<ShipType, Vec<ShipInstance>>);

impl FleetInstances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ship: ShipType, instances: Vec<ShipInstance>) {
        self.0.insert(ship, instances);
    }

    /// Surviving instances of `ship`; empty when the type is absent.
    pub fn survivors(&self, ship: ShipType) -> &[ShipInstance] {
        self.0.get(&ship).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn survivors_mut(&mut self, ship: ShipType) -> Option<&mut Vec<ShipInstance>> {
        self.0.get_mut(&ship)
    }

    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn types_with_survivors(&self) -> Vec<ShipType> {
        self.0
            .iter()
            .filter(|(_, ships)| !ships.is_empty())
            .map(|(ship, _)| *ship)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipType, &[ShipInstance])> + '_ {
        self.0.iter().map(|(ship, ships)| (*ship, ships.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ShipType, &mut Vec<ShipInstance>)> + '_ {
        self.0.iter_mut().map(|(ship, ships)| (*ship, ships))
    }
}

/// Expand a count-form fleet into independent ship instances, each a fresh
/// copy of the provider's base specs for its type.
pub fn to_instances<P>(fleet: &Fleet, provider: &P) -> Result<FleetInstances>
where
    P: ShipSpecProvider + ?Sized,
{
    let mut instances = FleetInstances::new();
    for (ship, count) in fleet.iter() {
        let specs = provider
            .specs(ship)
            .ok_or(BattleError::MissingShipSpecs(ship))?;
        let too_large =
            || BattleError::InvalidFleet(format!("count {count} for {ship} too large"));
        let count = usize::try_from(count).map_err(|_| too_large())?;
        let mut ships = Vec::new();
        ships.try_reserve_exact(count).map_err(|_| too_large())?;
        ships.resize(count, specs);
        instances.insert(ship, ships);
    }
    Ok(instances)
}

/// Collapse instances back to per-type counts.
pub fn to_fleet(instances: &FleetInstances) -> Fleet {
    instances
        .iter()
        .map(|(ship, ships)| (ship, ships.len() as u64))
        .collect()
}

/// True iff no type has a surviving instance. A type present with an empty
/// collection counts as empty.
pub fn is_fleet_empty(instances: &FleetInstances) -> bool {
    instances.iter().all(|(_, ships)| ships.is_empty())
}
