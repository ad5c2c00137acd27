//! Ship types, base specs and the provider seam that maps one to the other.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BattleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipType {
    LightFighter,
    HeavyFighter,
    SmallTransporter,
    LargeTransporter,
    BattleShip,
    Mothership,
}

impl ShipType {
    pub const ALL: [ShipType; 6] = [
        Self::LightFighter,
        Self::HeavyFighter,
        Self::SmallTransporter,
        Self::LargeTransporter,
        Self::BattleShip,
        Self::Mothership,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LightFighter => "light_fighter",
            Self::HeavyFighter => "heavy_fighter",
            Self::SmallTransporter => "small_transporter",
            Self::LargeTransporter => "large_transporter",
            Self::BattleShip => "battle_ship",
            Self::Mothership => "mothership",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a ship name for lookup: lowercase, spaces and dashes become underscores.
fn normalize_lookup(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect()
}

impl FromStr for ShipType {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_lookup(s);
        Self::ALL
            .into_iter()
            .find(|ship| ship.as_str() == normalized)
            .ok_or_else(|| BattleError::UnknownShipType(s.trim().to_string()))
    }
}

/// Hull, shield and weapon values of one ship.
///
/// The same record serves as a type's immutable baseline and as the mutable
/// state of a single ship during battle (see [ShipInstance]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpecs {
    pub hull: f64,
    pub shields: f64,
    pub weapons: f64,
}

/// One concrete ship in battle. Hull and shields are driven down by fights;
/// weapons are never touched after creation.
pub type ShipInstance = ShipSpecs;

impl ShipSpecs {
    pub const fn new(hull: f64, shields: f64, weapons: f64) -> Self {
        Self {
            hull,
            shields,
            weapons,
        }
    }
}

/// Maps a ship type to its base specs. Implementations must be pure: the same
/// type always yields the same specs.
pub trait ShipSpecProvider {
    fn specs(&self, ship: ShipType) -> Option<ShipSpecs>;
}

impl<F> ShipSpecProvider for F
where
    F: Fn(ShipType) -> Option<ShipSpecs>,
{
    fn specs(&self, ship: ShipType) -> Option<ShipSpecs> {
        self(ship)
    }
}

impl ShipSpecProvider for BTreeMap<ShipType, ShipSpecs> {
    fn specs(&self, ship: ShipType) -> Option<ShipSpecs> {
        self.get(&ship).copied()
    }
}
