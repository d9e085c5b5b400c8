//! Controller for the active mock state: collection selection plus ad-hoc
//! route overrides.
//!
//! `MocksController` layers mutable selection state over the immutable
//! definition store. The state is nothing more than the selected collection
//! id and an assignment map; reads re-join the map against the store, so
//! they always reflect the latest mutation.

use crate::error::Error;
use crate::mocks::resolver::{self, ActiveRoute, AssignmentMap, ResolveError};
use crate::mocks::store::DefinitionStore;
use crate::types::route::Transport;
use std::sync::Arc;
use tracing::debug;

/// Tracks which preset/variant currently answers each route.
///
/// [`use_collection`](Self::use_collection) replaces the whole assignment
/// map; [`use_routes`](Self::use_routes) and
/// [`use_socket`](Self::use_socket) overlay individual assignments on top
/// of it. Every mutation validates its full input against the store before
/// touching state, so a failed call leaves the controller exactly as it
/// was.
#[derive(Debug, Clone)]
pub struct MocksController {
    /// Shared definition store, never mutated
    store: Arc<DefinitionStore>,
    /// Currently selected collection ID
    selected_collection: Option<String>,
    /// Effective route assignments, in activation order
    assignments: AssignmentMap,
}

impl MocksController {
    /// Create a controller with no collection selected and no overrides.
    pub fn new(store: Arc<DefinitionStore>) -> Self {
        Self {
            store,
            selected_collection: None,
            assignments: AssignmentMap::new(),
        }
    }

    /// Load definitions and create a controller in one step.
    ///
    /// When `default_collection` is given the controller behaves as if
    /// [`use_collection`](Self::use_collection) was called right away,
    /// propagating its errors.
    pub fn from_files(
        collections_path: &str,
        routes_pattern: &str,
        default_collection: Option<&str>,
    ) -> Result<Self, Error> {
        let store = DefinitionStore::load(collections_path, routes_pattern)?;
        let mut controller = Self::new(Arc::new(store));
        if let Some(collection_id) = default_collection {
            controller.use_collection(collection_id)?;
        }
        Ok(controller)
    }

    /// Select a collection, replacing the entire assignment map.
    ///
    /// Resolves the collection's inheritance chain and checks that every
    /// resulting assignment materializes against the store. On error the
    /// previous selection and overrides stay untouched; on success any
    /// prior ad-hoc overrides are discarded.
    pub fn use_collection(&mut self, collection_id: &str) -> Result<(), ResolveError> {
        let assignments = resolver::resolve(collection_id, &self.store)?;
        // Reject assignments that cannot materialize, so later reads
        // cannot trip over a dangling reference.
        resolver::materialize(&assignments, &self.store)?;

        debug!(
            collection = collection_id,
            routes = assignments.len(),
            "collection selected"
        );
        self.selected_collection = Some(collection_id.to_string());
        self.assignments = assignments;
        Ok(())
    }

    /// Override or add HTTP route assignments without changing the
    /// selected collection.
    ///
    /// # Arguments
    /// * `references` - Route reference strings in format `route_id:preset_id:variant_id`
    ///
    /// # Errors
    /// The whole batch is validated first; any invalid reference fails the
    /// call and leaves state unchanged. Returns an error if:
    /// - a reference is malformed, or its route, preset, or variant is unknown
    /// - a reference points at a WebSocket route (use `use_socket` for those)
    ///
    /// # Example
    /// ```ignore
    /// controller.use_collection("base")?;
    /// controller.use_routes(&["users-api:error:not-found".to_string()])?;
    /// ```
    pub fn use_routes(&mut self, references: &[String]) -> Result<(), ResolveError> {
        self.apply_references(references, Transport::Http)
    }

    /// Override or add WebSocket route assignments without changing the
    /// selected collection.
    ///
    /// Same contract as [`use_routes`](Self::use_routes) with the
    /// transports swapped: HTTP routes are rejected here.
    pub fn use_socket(&mut self, references: &[String]) -> Result<(), ResolveError> {
        self.apply_references(references, Transport::WebSocket)
    }

    fn apply_references(
        &mut self,
        references: &[String],
        expected: Transport,
    ) -> Result<(), ResolveError> {
        // Validate the full batch before the first write.
        let mut staged = Vec::with_capacity(references.len());
        for reference in references {
            staged.push(resolver::validate_reference(
                &self.store,
                reference,
                expected,
            )?);
        }

        debug!(
            transport = %expected,
            count = staged.len(),
            "route overrides applied"
        );
        for (route_id, variant_ref) in staged {
            // An overridden route keeps its position; new routes append.
            self.assignments.insert(route_id, variant_ref);
        }
        Ok(())
    }

    /// Materialize the current assignments into active routes.
    ///
    /// Re-joins the assignment map against the store on every call. With
    /// no collection selected and no overrides the result is empty. Every
    /// assignment was validated when it entered the map, so any state
    /// reachable through this controller materializes cleanly.
    pub fn get_active_routes(&self) -> Result<Vec<ActiveRoute>, ResolveError> {
        resolver::materialize(&self.assignments, &self.store)
    }

    /// Id of the selected collection.
    ///
    /// `None` until the first successful
    /// [`use_collection`](Self::use_collection); route overrides never
    /// change it.
    pub fn current_collection(&self) -> Option<&str> {
        self.selected_collection.as_deref()
    }

    /// The effective route assignments, in activation order.
    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    /// The shared definition store.
    pub fn store(&self) -> &Arc<DefinitionStore> {
        &self.store
    }
}
