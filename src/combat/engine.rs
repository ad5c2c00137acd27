//! Battle resolution: rounds of mutual attacks between two fleets until one
//! side is wiped out or the round cap is hit.

use std::collections::BTreeMap;

use tracing::debug;

use crate::combat::fleet::{is_fleet_empty, to_fleet, to_instances, Fleet, FleetInstances};
use crate::combat::report::{BattleReport, BattleRound, FleetSnapshot, Winner};
use crate::combat::rng::{RandomSource, Rng};
use crate::combat::ship::{ShipInstance, ShipSpecProvider, ShipSpecs, ShipType};
use crate::data::specs::StandardSpecs;
use crate::error::{BattleError, Result};

pub const MAX_ROUNDS: u32 = 6;

/// Below this fraction of the target's hull baseline, a ship may break apart.
pub const CRITICAL_HULL_RATIO: f64 = 0.7;

/// Weapons weaker than `shields / SHIELD_BOUNCE_DIVISOR` bounce off entirely.
pub const SHIELD_BOUNCE_DIVISOR: f64 = 100.0;

type BaseSpecs = BTreeMap<ShipType, ShipSpecs>;

/// Resolve one shot from `attacker` on `target`.
///
/// `reference` is the undamaged baseline of the target's type and is only
/// read for the destruction check.
pub fn fight<R>(
    attacker: &ShipInstance,
    target: &mut ShipInstance,
    reference: &ShipSpecs,
    rng: &mut R,
) where
    R: RandomSource + ?Sized,
{
    if attacker.weapons < target.shields / SHIELD_BOUNCE_DIVISOR {
        // too weak to register against the shields
    } else if attacker.weapons < target.shields {
        target.shields -= attacker.weapons;
    } else {
        target.hull -= attacker.weapons - target.shields;
        target.shields = 0.0;
    }

    if target.hull < reference.hull * CRITICAL_HULL_RATIO {
        let prob = 1.0 - target.hull / reference.hull;
        if rng.next_f64() < prob {
            target.hull = 0.0;
        }
    }
}

/// Runs battles between two count-form fleets using base specs from `P`.
#[derive(Debug, Clone)]
pub struct BattleCalculator<P> {
    provider: P,
}

impl BattleCalculator<StandardSpecs> {
    pub fn standard() -> Self {
        Self::new(StandardSpecs)
    }
}

impl Default for BattleCalculator<StandardSpecs> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<P: ShipSpecProvider> BattleCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fight a battle with an entropy-seeded generator.
    pub fn calculate(&self, attacker: &Fleet, defender: &Fleet) -> Result<BattleReport> {
        let mut rng = Rng::from_entropy();
        self.calculate_with_rng(attacker, defender, &mut rng)
    }

    /// Fight a reproducible battle: the same seed always yields the same report.
    pub fn calculate_seeded(
        &self,
        attacker: &Fleet,
        defender: &Fleet,
        seed: u64,
    ) -> Result<BattleReport> {
        let mut rng = Rng::new(seed);
        self.calculate_with_rng(attacker, defender, &mut rng)
    }

    pub fn calculate_with_rng<R>(
        &self,
        attacker: &Fleet,
        defender: &Fleet,
        rng: &mut R,
    ) -> Result<BattleReport>
    where
        R: RandomSource + ?Sized,
    {
        let base = self.resolve_base_specs(attacker, defender)?;
        let mut attacking = to_instances(attacker, &base)?;
        let mut defending = to_instances(defender, &base)?;

        let start = FleetSnapshot {
            attacker: to_fleet(&attacking),
            defender: to_fleet(&defending),
        };
        debug!(
            attacker_ships = attacker.total(),
            defender_ships = defender.total(),
            "battle started"
        );

        let mut rounds = Vec::new();
        let mut round = 1;
        while !is_fleet_empty(&attacking) && !is_fleet_empty(&defending) && round <= MAX_ROUNDS {
            sub_battle(&attacking, &mut defending, &base, rng);
            sub_battle(&defending, &mut attacking, &base, rng);

            rounds.push(BattleRound {
                round,
                attacker: to_fleet(&attacking),
                defender: to_fleet(&defending),
            });

            reset_shields(&mut attacking, &base);
            reset_shields(&mut defending, &base);

            debug!(
                round,
                attacker_survivors = attacking.total(),
                defender_survivors = defending.total(),
                "round complete"
            );
            round += 1;
        }

        let winner = determine_winner(&attacking, &defending);
        debug!(%winner, rounds = rounds.len(), "battle finished");

        Ok(BattleReport {
            winner,
            start,
            rounds,
        })
    }

    /// Look up every type appearing on either side once, up front.
    fn resolve_base_specs(&self, attacker: &Fleet, defender: &Fleet) -> Result<BaseSpecs> {
        let mut base = BaseSpecs::new();
        for ship in attacker.ship_types().chain(defender.ship_types()) {
            if base.contains_key(&ship) {
                continue;
            }
            let specs = self
                .provider
                .specs(ship)
                .ok_or(BattleError::MissingShipSpecs(ship))?;
            base.insert(ship, specs);
        }
        Ok(base)
    }
}

/// One side's full attack pass. Every ship in `attacking` fires exactly once;
/// destroyed defenders are removed immediately so later shots cannot pick them.
fn sub_battle<R>(
    attacking: &FleetInstances,
    defending: &mut FleetInstances,
    base: &BaseSpecs,
    rng: &mut R,
) where
    R: RandomSource + ?Sized,
{
    // Types are picked uniformly, regardless of how many ships each has left.
    let mut targets = defending.types_with_survivors();

    for (_, ships) in attacking.iter() {
        for attacker in ships {
            if targets.is_empty() {
                return;
            }
            let type_idx = rng.next_index(targets.len());
            let target_type = targets[type_idx];
            let Some(reference) = base.get(&target_type) else {
                continue;
            };
            let Some(survivors) = defending.survivors_mut(target_type) else {
                continue;
            };

            let idx = rng.next_index(survivors.len());
            fight(attacker, &mut survivors[idx], reference, rng);

            if survivors[idx].hull <= 0.0 {
                survivors.swap_remove(idx);
                if survivors.is_empty() {
                    targets.remove(type_idx);
                }
            }
        }
    }
}

fn reset_shields(fleet: &mut FleetInstances, base: &BaseSpecs) {
    for (ship, ships) in fleet.iter_mut() {
        let Some(specs) = base.get(&ship) else {
            continue;
        };
        for instance in ships.iter_mut() {
            instance.shields = specs.shields;
        }
    }
}

/// Both sides standing is a draw; otherwise the attacker wins unless it was
/// the one wiped out. Mutual annihilation therefore goes to the attacker.
fn determine_winner(attacking: &FleetInstances, defending: &FleetInstances) -> Winner {
    if !is_fleet_empty(attacking) && !is_fleet_empty(defending) {
        return Winner::Draw;
    }
    if is_fleet_empty(defending) {
        return Winner::Attacker;
    }
    Winner::Defender
}
