//! The game host a query runs against.

use std::rc::Rc;

use itemquery_foundation::random::shared;
use itemquery_foundation::{GameRandom, ItemCatalog, Location, Player, RngHandle, WorldState};

use crate::condition::{ConditionEvaluator, StateQueries};

/// Everything a query can see about the running game.
///
/// Contexts borrow their default location, player, and random stream from
/// here when the caller doesn't supply them.
#[derive(Debug)]
pub struct Game {
    catalog: ItemCatalog,
    world: WorldState,
    player: Rc<Player>,
    location: Rc<Location>,
    conditions: Box<dyn ConditionEvaluator>,
    random: RngHandle,
}

impl Game {
    /// Creates a game with a default player on the farm.
    ///
    /// The shared random stream is seeded from the world seed.
    #[must_use]
    pub fn new(catalog: ItemCatalog, world: WorldState) -> Self {
        let random = shared(GameRandom::seeded(world.seed));
        Self {
            catalog,
            world,
            player: Rc::new(Player::new("Farmer")),
            location: Rc::new(Location::new("Farm")),
            conditions: Box::new(StateQueries),
            random,
        }
    }

    /// Builder method to set the current player.
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = Rc::new(player);
        self
    }

    /// Builder method to set the current location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Rc::new(location);
        self
    }

    /// Builder method to replace the condition evaluator.
    #[must_use]
    pub fn with_conditions(mut self, conditions: impl ConditionEvaluator + 'static) -> Self {
        self.conditions = Box::new(conditions);
        self
    }

    /// Builder method to replace the shared random stream.
    #[must_use]
    pub fn with_random(mut self, random: GameRandom) -> Self {
        self.random = shared(random);
        self
    }

    /// Wraps the game for sharing between contexts.
    #[must_use]
    pub fn into_shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// The item catalog.
    #[must_use]
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The world state.
    #[must_use]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The current player.
    #[must_use]
    pub fn player(&self) -> &Rc<Player> {
        &self.player
    }

    /// The current location.
    #[must_use]
    pub fn location(&self) -> &Rc<Location> {
        &self.location
    }

    /// The condition evaluator.
    #[must_use]
    pub fn conditions(&self) -> &dyn ConditionEvaluator {
        self.conditions.as_ref()
    }

    /// The shared random stream.
    #[must_use]
    pub fn random(&self) -> &RngHandle {
        &self.random
    }
}
