//! Mocks manager for resolving collections against loaded definitions.
//!
//! `MocksManager` is the stateless entry point: it owns nothing but a shared
//! [`DefinitionStore`] reference and resolves collections on demand. Callers
//! that need to track an active selection use `MocksController` instead.

use crate::error::Error;
use crate::mocks::resolver::{self, ActiveRoute, ResolveError};
use crate::mocks::store::DefinitionStore;
use std::sync::Arc;

/// Resolves collections against an immutable definition store.
///
/// `resolve_collection` is a pure function of the store, so the same id
/// always yields the same routes in the same order. Managers are cheap to
/// clone; clones share the underlying store.
#[derive(Debug, Clone)]
pub struct MocksManager {
    store: Arc<DefinitionStore>,
}

impl MocksManager {
    /// Create a manager over an existing store.
    pub fn new(store: Arc<DefinitionStore>) -> Self {
        Self { store }
    }

    /// Load definitions from a collections file and a routes file/glob
    /// pattern, then create a manager over them.
    pub fn from_files(collections_path: &str, routes_pattern: &str) -> Result<Self, Error> {
        let store = DefinitionStore::load(collections_path, routes_pattern)?;
        Ok(Self::new(Arc::new(store)))
    }

    /// The shared definition store.
    pub fn store(&self) -> &Arc<DefinitionStore> {
        &self.store
    }

    /// Resolve a collection by id, returning its active routes.
    ///
    /// Flattens the inheritance chain declared via `from` (own entries win
    /// over inherited ones) and joins every assignment against the store.
    pub fn resolve_collection(
        &self,
        collection_id: &str,
    ) -> Result<Vec<ActiveRoute>, ResolveError> {
        let assignments = resolver::resolve(collection_id, &self.store)?;
        resolver::materialize(&assignments, &self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::collection::Collection;
    use crate::types::preset::Preset;
    use crate::types::route::{HttpMethod, Route, RouteKind, Transport};
    use crate::types::variant::Variant;
    use rstest::rstest;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn route_with_variants(id: &str, url: &str, preset_id: &str, variants: Vec<Variant>) -> Route {
        Route {
            id: id.to_string(),
            url: url.to_string(),
            kind: RouteKind::Http {
                method: HttpMethod::Get,
            },
            presets: vec![Preset {
                id: preset_id.to_string(),
                params: None,
                query: None,
                headers: None,
                payload: None,
                variants,
            }],
        }
    }

    fn variant_with_body(id: &str, status: u16, body: serde_json::Value) -> Variant {
        Variant {
            id: id.to_string(),
            status,
            headers: None,
            body: Some(body),
        }
    }

    fn test_manager(collections: Vec<Collection>) -> MocksManager {
        let store = DefinitionStore::new(
            vec![
                route_with_variants(
                    "users-api",
                    "/api/users",
                    "success",
                    vec![
                        variant_with_body("many-results", 200, json!([{"id": 1}, {"id": 2}])),
                        variant_with_body("no-results", 200, json!([])),
                    ],
                ),
                route_with_variants(
                    "products-api",
                    "/api/products",
                    "success",
                    vec![variant_with_body("all", 200, json!({"total": 99.99}))],
                ),
            ],
            collections,
        );
        MocksManager::new(Arc::new(store))
    }

    #[rstest]
    fn test_resolve_collection_returns_active_routes() {
        let manager = test_manager(vec![Collection {
            id: "base".to_string(),
            from: None,
            routes: vec![
                "users-api:success:many-results".to_string(),
                "products-api:success:all".to_string(),
            ],
        }]);

        let active = manager.resolve_collection("base").unwrap();

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].route.id, "users-api");
        assert_eq!(active[0].route.transport, Transport::Http);
        assert_eq!(active[0].variant.body, Some(json!([{"id": 1}, {"id": 2}])));
        assert_eq!(active[1].route.id, "products-api");
        assert_eq!(active[1].variant.body, Some(json!({"total": 99.99})));
    }

    #[rstest]
    fn test_resolve_collection_is_deterministic() {
        let manager = test_manager(vec![
            Collection {
                id: "base".to_string(),
                from: None,
                routes: vec!["users-api:success:many-results".to_string()],
            },
            Collection {
                id: "extended".to_string(),
                from: Some("base".to_string()),
                routes: vec!["products-api:success:all".to_string()],
            },
        ]);

        let first = manager.resolve_collection("extended").unwrap();
        let second = manager.resolve_collection("extended").unwrap();
        let from_clone = manager.clone().resolve_collection("extended").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, from_clone);
    }

    #[rstest]
    fn test_resolve_collection_unknown_id() {
        let manager = test_manager(vec![]);

        let error = manager.resolve_collection("missing").unwrap_err();
        assert_eq!(
            error,
            ResolveError::CollectionNotFound {
                collection_id: "missing".to_string()
            }
        );
    }

    #[rstest]
    fn test_resolve_collection_referencing_unknown_route() {
        let manager = test_manager(vec![Collection {
            id: "broken".to_string(),
            from: None,
            routes: vec!["ghost-api:success:ok".to_string()],
        }]);

        let error = manager.resolve_collection("broken").unwrap_err();
        assert_eq!(
            error,
            ResolveError::RouteNotFound {
                route_id: "ghost-api".to_string()
            }
        );
    }

    #[rstest]
    fn test_from_files_end_to_end() {
        let dir = TempDir::new().expect("Should create temp dir");
        fs::write(
            dir.path().join("collections.yml"),
            "- id: base\n  routes:\n    - get-users:success:single\n",
        )
        .expect("Should write fixture");
        let routes_dir = dir.path().join("routes");
        fs::create_dir(&routes_dir).expect("Should create routes dir");
        fs::write(
            routes_dir.join("users.yml"),
            r#"
id: get-users
url: /api/users
transport: HTTP
method: GET
presets:
  - id: success
    variants:
      - id: single
        status: 200
        body:
          id: 1
          name: Ada
"#,
        )
        .expect("Should write fixture");

        let manager = MocksManager::from_files(
            dir.path().join("collections.yml").to_str().unwrap(),
            routes_dir.join("*.yml").to_str().unwrap(),
        )
        .unwrap();

        let active = manager.resolve_collection("base").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].route.url, "/api/users");
        assert_eq!(active[0].variant.body, Some(json!({"id": 1, "name": "Ada"})));
    }

    #[rstest]
    fn test_from_files_missing_collections_file() {
        let dir = TempDir::new().expect("Should create temp dir");

        let result = MocksManager::from_files(
            dir.path().join("missing.yml").to_str().unwrap(),
            dir.path().join("*.yml").to_str().unwrap(),
        );

        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }
}
