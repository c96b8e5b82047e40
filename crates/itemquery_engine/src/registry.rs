//! Resolver registration.
//!
//! A resolver turns the arguments of one query key into items. Keys are
//! matched case-insensitively and the registry is append-only: a key can't
//! be replaced once registered.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use itemquery_foundation::{Error, ErrorKind, RngHandle};

use crate::context::QueryContext;
use crate::resolve::{QueryEngine, ResolveOptions, ResolvedItem};
use crate::sink::ErrorSink;

/// A lazily produced sequence of resolved items.
pub type ResolvedIter<'a> = Box<dyn Iterator<Item = ResolvedItem> + 'a>;

/// A resolver function.
///
/// Resolvers may report problems to the sink and keep going, or return an
/// error which the engine reports for them.
pub type ResolverFn =
    for<'a> fn(ResolverCall<'a>, &mut dyn ErrorSink) -> itemquery_foundation::Result<ResolvedIter<'a>>;

/// Everything a resolver receives for one query.
#[derive(Clone, Copy)]
pub struct ResolverCall<'a> {
    /// The query key, as written.
    pub key: &'a str,
    /// Raw argument text after the key.
    pub args: &'a str,
    /// The sealed context for this query.
    pub context: &'a Rc<QueryContext>,
    /// The engine, for resolving nested queries.
    pub engine: &'a QueryEngine,
    /// Whether duplicate items will be dropped.
    pub avoid_repeat: bool,
    /// Qualified IDs which will be dropped.
    pub avoid_ids: Option<&'a HashSet<String>>,
}

impl ResolverCall<'_> {
    /// The random stream for this query.
    #[must_use]
    pub fn random(&self) -> &RngHandle {
        self.context.random()
    }

    /// Returns true if an item ID is excluded by the caller.
    ///
    /// Resolvers can use this to skip building items that would be
    /// filtered out anyway.
    #[must_use]
    pub fn is_avoided(&self, qualified_id: &str) -> bool {
        self.avoid_ids.is_some_and(|ids| ids.contains(qualified_id))
    }

    /// Resolves a query nested inside this one.
    ///
    /// The nested query runs in a child context and inherits the caller's
    /// duplicate and exclusion settings.
    pub fn resolve_nested(&self, query: &str, errors: &mut dyn ErrorSink) -> Vec<ResolvedItem> {
        let context = QueryContext::child(self.context).build();
        let options = ResolveOptions {
            avoid_repeat: self.avoid_repeat,
            avoid_ids: self.avoid_ids,
            ..ResolveOptions::default()
        };
        self.engine.resolve(query, context, &options, errors)
    }
}

impl fmt::Debug for ResolverCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverCall")
            .field("key", &self.key)
            .field("args", &self.args)
            .field("avoid_repeat", &self.avoid_repeat)
            .finish_non_exhaustive()
    }
}

/// Normalizes a resolver key for lookup.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

/// Append-only table of resolvers by key.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, ResolverFn>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank, contains a space, or is
    /// already registered.
    pub fn register(&mut self, key: &str, resolver: ResolverFn) -> itemquery_foundation::Result<()> {
        let normalized = normalize_key(key);
        if normalized.is_empty() || normalized.contains(' ') {
            return Err(Error::new(ErrorKind::InvalidResolverKey(key.to_string())));
        }
        if self.resolvers.contains_key(&normalized) {
            return Err(Error::new(ErrorKind::DuplicateResolver(normalized)));
        }
        self.resolvers.insert(normalized, resolver);
        Ok(())
    }

    /// Looks up a resolver by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ResolverFn> {
        if key.bytes().any(|b| b.is_ascii_lowercase()) {
            return self.resolvers.get(&normalize_key(key)).copied();
        }
        self.resolvers.get(key.trim()).copied()
    }

    /// Returns true if a resolver is registered for the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Registered keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
