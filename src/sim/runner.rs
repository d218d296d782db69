use std::io;
use std::thread;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use super::config::{ConfigError, SimConfig};
use super::conflicts::ConflictSystem;
use super::economy::EconomySystem;
use super::system::{SimSystem, TickContext};
use crate::flush::flush_to_jsonl;
use crate::id::FactionId;
use crate::model::World;

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Terminated,
}

/// The standard phase order: every faction's economy, then border fights.
pub fn default_systems() -> Vec<Box<dyn SimSystem>> {
    vec![Box::new(EconomySystem), Box::new(ConflictSystem)]
}

/// Call each system's `tick()` once, in registration order.
pub fn dispatch_systems(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
) {
    for system in systems.iter_mut() {
        let mut ctx = TickContext {
            world: &mut *world,
            rng: &mut *rng,
        };
        system.tick(&mut ctx);
    }
}

/// Drives a world from setup until at most one faction is left standing.
pub struct Simulation {
    world: World,
    systems: Vec<Box<dyn SimSystem>>,
    rng: SmallRng,
    state: SimState,
    config: SimConfig,
    seed: u64,
}

impl Simulation {
    /// Validate the config, seed the RNG and scatter the factions over the board.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut world = World::new(config.board_size);
        let placed = world.populate(config.faction_count, &mut rng);
        tracing::info!(
            seed,
            board_size = config.board_size,
            factions = placed,
            "simulation initialized"
        );

        Ok(Self::assemble(world, rng, config, seed))
    }

    /// Run an already-built world, e.g. a hand-placed scenario.
    pub fn from_world(world: World, seed: u64) -> Self {
        let config = SimConfig::new(world.grid.size(), world.factions.len()).with_seed(seed);
        Self::assemble(world, SmallRng::seed_from_u64(seed), config, seed)
    }

    fn assemble(world: World, rng: SmallRng, config: SimConfig, seed: u64) -> Self {
        let state = if world.alive_count() < 2 {
            SimState::Terminated
        } else {
            SimState::Running
        };
        Self {
            world,
            systems: default_systems(),
            rng,
            state,
            config,
            seed,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.config.max_turns = Some(max_turns);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The last faction standing, once the run has ended with exactly one.
    pub fn survivor(&self) -> Option<FactionId> {
        let mut alive = self.world.factions.iter().filter(|f| f.alive);
        match (alive.next(), alive.next()) {
            (Some(f), None) => Some(f.id),
            _ => None,
        }
    }

    /// Advance one tick. Does nothing once terminated.
    pub fn step(&mut self) -> SimState {
        if self.state == SimState::Terminated {
            return self.state;
        }

        self.world.turn += 1;
        dispatch_systems(&mut self.world, &mut self.systems, &mut self.rng);

        let alive = self.world.alive_count();
        let out_of_turns = self
            .config
            .max_turns
            .is_some_and(|max| self.world.turn >= max);
        if alive < 2 || out_of_turns {
            self.state = SimState::Terminated;
            tracing::info!(
                turn = self.world.turn,
                alive,
                survivor = ?self.survivor(),
                "simulation finished"
            );
        }
        self.state
    }

    /// Step until terminated, calling `on_tick` after every tick and pausing
    /// for the configured delay in between. Writes the export files at the
    /// end if an output directory is configured.
    pub fn run(&mut self, mut on_tick: impl FnMut(&World)) -> io::Result<()> {
        let delay = self.config.turn_delay_duration();
        while self.state == SimState::Running {
            self.step();
            on_tick(&self.world);
            if self.state == SimState::Running && !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        if let Some(dir) = &self.config.output_dir {
            flush_to_jsonl(&self.world, dir)?;
            tracing::info!(dir = %dir.display(), "history written");
        }
        Ok(())
    }
}
