//! Query contexts.
//!
//! A [`QueryContext`] carries the environment a query resolves in: the
//! game, location, player, random stream, custom fields, and a link to the
//! context of the query that spawned it. The engine seals a context by
//! assigning its query string when resolution starts; after that it is only
//! reachable through an `Rc` and can't be changed.

use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

use im::HashMap;
use itemquery_foundation::random::shared;
use itemquery_foundation::{GameRandom, Item, ItemCatalog, Location, Player, RngHandle, WorldState};

use crate::condition::{StateQueryContext, is_immutably_true};
use crate::game::Game;

/// A custom field value attached to a context.
pub type CustomField = Arc<dyn Any + Send + Sync>;

/// The environment a query resolves in.
#[derive(Debug)]
pub struct QueryContext {
    game: Rc<Game>,
    location: Rc<Location>,
    player: Rc<Player>,
    random: Option<RngHandle>,
    source_phrase: Option<String>,
    query_string: Option<String>,
    parent: Option<Rc<QueryContext>>,
    custom_fields: HashMap<String, CustomField>,
    depth: usize,
}

impl QueryContext {
    /// Creates a root context using the game's defaults.
    #[must_use]
    pub fn new(game: &Rc<Game>) -> Self {
        Self::builder(game).build()
    }

    /// Starts building a root context.
    #[must_use]
    pub fn builder(game: &Rc<Game>) -> QueryContextBuilder {
        QueryContextBuilder {
            game: Rc::clone(game),
            location: None,
            player: None,
            random: None,
            source_phrase: None,
            parent: None,
            custom_fields: HashMap::new(),
        }
    }

    /// Starts building a context for a query nested inside `parent`.
    ///
    /// The child inherits the parent's location, player, random stream,
    /// source phrase, and custom fields unless overridden.
    #[must_use]
    pub fn child(parent: &Rc<QueryContext>) -> QueryContextBuilder {
        QueryContextBuilder {
            game: Rc::clone(&parent.game),
            location: Some(Rc::clone(&parent.location)),
            player: Some(Rc::clone(&parent.player)),
            random: parent.random.clone(),
            source_phrase: parent.source_phrase.clone(),
            parent: Some(Rc::clone(parent)),
            custom_fields: parent.custom_fields.clone(),
        }
    }

    pub(crate) fn seal(mut self, query: &str) -> Rc<Self> {
        self.query_string = Some(query.to_string());
        Rc::new(self)
    }

    /// The game host.
    #[must_use]
    pub fn game(&self) -> &Rc<Game> {
        &self.game
    }

    /// Shortcut for the game's item catalog.
    #[must_use]
    pub fn catalog(&self) -> &ItemCatalog {
        self.game.catalog()
    }

    /// Shortcut for the game's world state.
    #[must_use]
    pub fn world(&self) -> &WorldState {
        self.game.world()
    }

    /// Location the query runs in.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Acting player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The random stream: the context's own, or the game's shared one.
    #[must_use]
    pub fn random(&self) -> &RngHandle {
        self.random.as_ref().unwrap_or_else(|| self.game.random())
    }

    /// Describes where the query came from, for error messages.
    #[must_use]
    pub fn source_phrase(&self) -> Option<&str> {
        self.source_phrase.as_deref()
    }

    /// The query being resolved; `None` until the context is sealed.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// The context of the enclosing query.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<QueryContext>> {
        self.parent.as_ref()
    }

    /// Nesting depth; root contexts are at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Query strings from this context outward to the root.
    ///
    /// Unsealed contexts are skipped.
    #[must_use]
    pub fn query_chain(&self) -> Vec<&str> {
        let mut chain = Vec::with_capacity(self.depth + 1);
        let mut current = Some(self);
        while let Some(context) = current {
            if let Some(query) = context.query_string() {
                chain.push(query);
            }
            current = context.parent.as_deref();
        }
        chain
    }

    /// Returns a custom field if it is set and has type `T`.
    #[must_use]
    pub fn custom_field<T: Any>(&self, key: &str) -> Option<&T> {
        self.custom_fields.get(key)?.downcast_ref::<T>()
    }

    /// Returns true if a custom field is set.
    #[must_use]
    pub fn has_custom_field(&self, key: &str) -> bool {
        self.custom_fields.contains_key(key)
    }

    /// Evaluates a condition in this context.
    ///
    /// No condition, or a blank one, passes.
    #[must_use]
    pub fn check_conditions(&self, condition: Option<&str>, target: Option<&Item>) -> bool {
        self.check_conditions_ignoring(condition, target, &[])
    }

    /// Evaluates a condition, treating queries with the given keys as passing.
    #[must_use]
    pub fn check_conditions_ignoring(
        &self,
        condition: Option<&str>,
        target: Option<&Item>,
        ignore_keys: &[&str],
    ) -> bool {
        if is_immutably_true(condition) {
            return true;
        }
        let Some(condition) = condition else {
            return true;
        };
        let state = StateQueryContext {
            world: self.world(),
            location: &self.location,
            player: &self.player,
            target_item: target,
            input_item: None,
            random: self.random(),
            ignore_keys,
        };
        self.game.conditions().check(condition, &state)
    }
}

/// Builds a [`QueryContext`].
#[derive(Debug)]
#[must_use]
pub struct QueryContextBuilder {
    game: Rc<Game>,
    location: Option<Rc<Location>>,
    player: Option<Rc<Player>>,
    random: Option<RngHandle>,
    source_phrase: Option<String>,
    parent: Option<Rc<QueryContext>>,
    custom_fields: HashMap<String, CustomField>,
}

impl QueryContextBuilder {
    /// Sets the location.
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(Rc::new(location));
        self
    }

    /// Sets the acting player.
    pub fn player(mut self, player: Player) -> Self {
        self.player = Some(Rc::new(player));
        self
    }

    /// Gives the context its own random stream.
    pub fn random(self, random: GameRandom) -> Self {
        self.random_handle(shared(random))
    }

    /// Shares an existing random stream with the context.
    pub fn random_handle(mut self, random: RngHandle) -> Self {
        self.random = Some(random);
        self
    }

    /// Describes where the query came from, like `shop 'SeedShop'`.
    pub fn source_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.source_phrase = Some(phrase.into());
        self
    }

    /// Attaches a custom field, replacing any inherited value.
    pub fn custom_field<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.custom_fields.insert(key.into(), Arc::new(value));
        self
    }

    /// Finishes the context.
    #[must_use]
    pub fn build(self) -> QueryContext {
        let depth = self.parent.as_ref().map_or(0, |p| p.depth + 1);
        QueryContext {
            location: self
                .location
                .unwrap_or_else(|| Rc::clone(self.game.location())),
            player: self.player.unwrap_or_else(|| Rc::clone(self.game.player())),
            game: self.game,
            random: self.random,
            source_phrase: self.source_phrase,
            query_string: None,
            parent: self.parent,
            custom_fields: self.custom_fields,
            depth,
        }
    }
}
