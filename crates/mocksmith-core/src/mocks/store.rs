//! Immutable definition store shared by managers and controllers.

use crate::config::error::ConfigError;
use crate::config::parser;
use crate::types::{collection::Collection, route::Route};
use std::collections::HashMap;
use tracing::debug;

/// Loaded route and collection definitions, keyed by id.
///
/// Built once and never mutated afterwards. Managers and controllers hold
/// it behind an `Arc`, so any number of them can read the same definitions
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    /// Map of route ID to Route
    routes: HashMap<String, Route>,
    /// Map of collection ID to Collection
    collections: HashMap<String, Collection>,
}

impl DefinitionStore {
    /// Build a store from already-loaded definitions.
    ///
    /// When two definitions share an id the later one wins.
    pub fn new(routes: Vec<Route>, collections: Vec<Collection>) -> Self {
        let routes = routes.into_iter().map(|r| (r.id.clone(), r)).collect();
        let collections = collections
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self {
            routes,
            collections,
        }
    }

    /// Load a store from a collections file and a routes file/glob pattern.
    ///
    /// A routes pattern matching no files leaves the store without route
    /// definitions; references to them surface at resolution time instead.
    pub fn load(collections_path: &str, routes_pattern: &str) -> Result<Self, ConfigError> {
        let routes = parser::load_routes(routes_pattern)?;
        let collections = parser::load_collections(collections_path)?;
        let store = Self::new(routes, collections);
        debug!(
            routes = store.route_count(),
            collections = store.collection_count(),
            "definition store loaded"
        );
        Ok(store)
    }

    /// Look up a route definition by id.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Look up a collection definition by id.
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.get(id)
    }

    /// Number of loaded route definitions.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of loaded collection definitions.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }
}
