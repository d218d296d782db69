use rand::Rng;

use super::combat::{CombatOutcome, resolve_combat};
use super::system::{SimSystem, TickContext};
use crate::model::BattleRecord;
use crate::model::world::pair_mut;

/// Finds every pair of bordering factions and makes them fight.
pub struct ConflictSystem;

impl SimSystem for ConflictSystem {
    fn name(&self) -> &str {
        "conflicts"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        resolve_border_clashes(ctx);
    }
}

/// Check each unordered pair of factions alive at the start of the phase,
/// in creation order. A faction beaten earlier in the pass has no territory
/// left, so it no longer borders anyone.
fn resolve_border_clashes(ctx: &mut TickContext) {
    let alive = ctx.world.alive_indices();
    if alive.len() < 2 {
        return;
    }

    let world = &mut *ctx.world;
    let turn = world.turn;
    for (n, &i) in alive.iter().enumerate() {
        for &j in &alive[n + 1..] {
            if !world.grid.adjacent(&world.factions[i], &world.factions[j]) {
                continue;
            }

            let (attacker_idx, defender_idx) = if ctx.rng.random_bool(0.5) {
                (i, j)
            } else {
                (j, i)
            };
            let (attacker, defender) = pair_mut(&mut world.factions, attacker_idx, defender_idx);
            let (attacker_id, defender_id) = (attacker.id, defender.id);

            match resolve_combat(&mut world.grid, attacker, defender, &mut *ctx.rng) {
                CombatOutcome::Draw => {
                    tracing::debug!(
                        turn,
                        attacker = %attacker_id,
                        defender = %defender_id,
                        "border clash without combatants"
                    );
                }
                outcome @ CombatOutcome::Decisive { winner, loser, .. } => {
                    let record = BattleRecord {
                        turn,
                        attacker: attacker_id,
                        defender: defender_id,
                        winner,
                        attacker_losses: outcome.losses_of(attacker_id).unwrap_or(0),
                        defender_losses: outcome.losses_of(defender_id).unwrap_or(0),
                    };
                    tracing::info!(
                        turn,
                        attacker = %attacker_id,
                        defender = %defender_id,
                        %winner,
                        attacker_losses = record.attacker_losses,
                        defender_losses = record.defender_losses,
                        "faction {loser} eliminated"
                    );
                    world.battle_log.push(record);
                }
            }
        }
    }
}
