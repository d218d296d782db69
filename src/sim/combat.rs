use rand::{Rng, RngCore};

use super::rules::{PLUNDER_MAX, PLUNDER_MIN};
use crate::id::FactionId;
use crate::model::{Faction, Grid};

/// How a border clash ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Neither side had any strength; nothing changed.
    Draw,
    Decisive {
        winner: FactionId,
        loser: FactionId,
        winner_losses: usize,
        /// Always the loser's whole pre-battle army.
        loser_losses: usize,
    },
}

impl CombatOutcome {
    pub fn winner(&self) -> Option<FactionId> {
        match self {
            CombatOutcome::Draw => None,
            CombatOutcome::Decisive { winner, .. } => Some(*winner),
        }
    }

    /// Combatants lost by `id`, or `None` for a draw or an uninvolved id.
    pub fn losses_of(&self, id: FactionId) -> Option<usize> {
        match *self {
            CombatOutcome::Draw => None,
            CombatOutcome::Decisive {
                winner,
                loser,
                winner_losses,
                loser_losses,
            } => {
                if id == winner {
                    Some(winner_losses)
                } else if id == loser {
                    Some(loser_losses)
                } else {
                    None
                }
            }
        }
    }
}

/// Casualties taken by the winning side.
///
/// `floor((W / S_w) * (S_l / S_w) * W)` capped at `W`, where `W` is the winner's
/// head-count and `S_w`, `S_l` the two strength totals before the fight.
pub fn winner_casualties(
    winner_count: usize,
    winner_strength: u32,
    loser_strength: u32,
) -> usize {
    if winner_strength == 0 {
        return 0;
    }
    let w = winner_count as f64;
    let s_w = f64::from(winner_strength);
    let s_l = f64::from(loser_strength);
    let losses = ((w / s_w) * (s_l / s_w) * w).floor() as usize;
    losses.min(winner_count)
}

/// Fight it out between two bordering factions.
///
/// The attacker needs strictly more total strength to win; a tie goes to the
/// defender. The loser's army is wiped out, part of its stockpile is carried
/// off, and it is removed from the board.
pub fn resolve_combat(
    grid: &mut Grid,
    attacker: &mut Faction,
    defender: &mut Faction,
    rng: &mut dyn RngCore,
) -> CombatOutcome {
    let attacker_strength = attacker.total_strength();
    let defender_strength = defender.total_strength();
    if attacker_strength == 0 && defender_strength == 0 {
        return CombatOutcome::Draw;
    }

    let (winner, loser, winner_strength, loser_strength) = if attacker_strength > defender_strength
    {
        (attacker, defender, attacker_strength, defender_strength)
    } else {
        (defender, attacker, defender_strength, attacker_strength)
    };

    let winner_losses =
        winner_casualties(winner.combatants.len(), winner_strength, loser_strength);
    let survivors = winner.combatants.len() - winner_losses;
    winner.combatants.truncate(survivors);

    let loser_losses = loser.combatants.len();
    loser.combatants.clear();

    winner.building_materials +=
        loser.building_materials * rng.random_range(PLUNDER_MIN..PLUNDER_MAX);
    winner.food += loser.food * rng.random_range(PLUNDER_MIN..PLUNDER_MAX);

    grid.remove(loser);

    CombatOutcome::Decisive {
        winner: winner.id,
        loser: loser.id,
        winner_losses,
        loser_losses,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::{Combatant, Coord};

    fn two_factions() -> (Grid, Faction, Faction) {
        let mut grid = Grid::new(10);
        let a = Faction::new(FactionId(1), &mut grid, Coord::new(0, 0)).unwrap();
        let b = Faction::new(FactionId(2), &mut grid, Coord::new(0, 1)).unwrap();
        grid.place(&a);
        grid.place(&b);
        (grid, a, b)
    }

    fn army(levels: &[u32]) -> Vec<Combatant> {
        levels.iter().map(|&l| Combatant::at_level(l)).collect()
    }

    #[test]
    fn casualty_formula_scenario() {
        // 10 combatants, strength 100, against strength 40
        assert_eq!(winner_casualties(10, 100, 40), 0);
    }

    #[test]
    fn casualty_formula_close_fight() {
        // (4/16) * (16/16) * 4 = 1
        assert_eq!(winner_casualties(4, 16, 16), 1);
        // (10/40) * (40/40) * 10 = 2.5
        assert_eq!(winner_casualties(10, 40, 40), 2);
    }

    #[test]
    fn casualties_never_exceed_army() {
        assert_eq!(winner_casualties(3, 4, 4), 2);
        // formula gives 625 here
        assert_eq!(winner_casualties(50, 4, 4), 50);
    }

    #[test]
    fn zero_strength_is_a_draw() {
        let (mut grid, mut a, mut b) = two_factions();
        a.combatants.clear();
        b.combatants.clear();
        a.food = 10.0;
        b.food = 20.0;
        let mut rng = SmallRng::seed_from_u64(1);

        let outcome = resolve_combat(&mut grid, &mut a, &mut b, &mut rng);

        assert_eq!(outcome, CombatOutcome::Draw);
        assert!(a.alive && b.alive);
        assert_eq!(a.food, 10.0);
        assert_eq!(b.food, 20.0);
        assert_eq!(grid.occupied_cells().len(), 2);
    }

    #[test]
    fn stronger_attacker_wins_scenario() {
        let (mut grid, mut a, mut b) = two_factions();
        a.combatants = army(&[4; 10]);
        b.combatants = army(&[1; 10]);
        assert_eq!(a.total_strength(), 100);
        assert_eq!(b.total_strength(), 40);
        b.food = 100.0;
        b.building_materials = 50.0;
        let mut rng = SmallRng::seed_from_u64(2);

        let outcome = resolve_combat(&mut grid, &mut a, &mut b, &mut rng);

        assert_eq!(
            outcome,
            CombatOutcome::Decisive {
                winner: a.id,
                loser: b.id,
                winner_losses: 0,
                loser_losses: 10,
            }
        );
        assert_eq!(a.combatants.len(), 10);
        assert!(b.combatants.is_empty());
        assert!(!b.alive);
        assert!(b.territory.is_empty());
        assert_eq!(grid.owner(Coord::new(0, 1)), None);
        assert!(!grid.is_active(b.id));
        assert!((100.0 * PLUNDER_MIN..100.0 * PLUNDER_MAX).contains(&a.food));
        assert!((50.0 * PLUNDER_MIN..50.0 * PLUNDER_MAX).contains(&a.building_materials));
        // the loser keeps its laborers
        assert_eq!(b.laborers.len(), 2);
    }

    #[test]
    fn tie_goes_to_defender() {
        let (mut grid, mut a, mut b) = two_factions();
        let mut rng = SmallRng::seed_from_u64(3);
        // both start with one level-1 combatant
        let outcome = resolve_combat(&mut grid, &mut a, &mut b, &mut rng);
        assert_eq!(outcome.winner(), Some(b.id));
        // (1/4) * (4/4) * 1 = 0.25
        assert_eq!(outcome.losses_of(b.id), Some(0));
        assert_eq!(outcome.losses_of(a.id), Some(1));
        assert!(!a.alive);
        assert!(b.alive);
    }

    #[test]
    fn unarmed_attacker_loses_to_armed_defender() {
        let (mut grid, mut a, mut b) = two_factions();
        a.combatants.clear();
        let mut rng = SmallRng::seed_from_u64(4);
        let outcome = resolve_combat(&mut grid, &mut a, &mut b, &mut rng);
        assert_eq!(
            outcome,
            CombatOutcome::Decisive {
                winner: b.id,
                loser: a.id,
                winner_losses: 0,
                loser_losses: 0,
            }
        );
        assert!(!a.alive);
    }

    #[test]
    fn winner_pays_in_close_fight() {
        let (mut grid, mut a, mut b) = two_factions();
        a.combatants = army(&[1; 8]);
        b.combatants = army(&[1; 6]);
        let mut rng = SmallRng::seed_from_u64(5);
        let outcome = resolve_combat(&mut grid, &mut a, &mut b, &mut rng);
        // (8/32) * (24/32) * 8 = 1.5
        assert_eq!(outcome.losses_of(a.id), Some(1));
        assert_eq!(outcome.losses_of(b.id), Some(6));
        assert_eq!(a.combatants.len(), 7);
    }

    #[test]
    fn plunder_never_decreases_winner_stock() {
        let (mut grid, mut a, mut b) = two_factions();
        a.combatants = army(&[2; 3]);
        a.food = 5.0;
        a.building_materials = 7.0;
        let mut rng = SmallRng::seed_from_u64(6);
        resolve_combat(&mut grid, &mut b, &mut a, &mut rng);
        assert!(a.food >= 5.0);
        assert!(a.building_materials >= 7.0);
    }
}
