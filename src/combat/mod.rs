pub mod engine;
pub mod fleet;
pub mod report;
pub mod rng;
pub mod ship;

pub use engine::{
    fight, BattleCalculator, CRITICAL_HULL_RATIO, MAX_ROUNDS, SHIELD_BOUNCE_DIVISOR,
};
pub use fleet::{is_fleet_empty, to_fleet, to_instances, Fleet, FleetInstances};
pub use report::{BattleReport, BattleRound, FleetSnapshot, Winner};
pub use rng::{FixedSequence, RandomSource, Rng};
pub use ship::{ShipInstance, ShipSpecProvider, ShipSpecs, ShipType};
