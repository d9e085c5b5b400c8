//! Collection resolution: inheritance flattening and materialization.
//!
//! Resolution happens in two steps. [`resolve`] walks a collection's `from`
//! chain and flattens it into an [`AssignmentMap`], deciding only *which*
//! preset/variant answers each route id. [`materialize`] then joins that map
//! against the definition store, producing one [`ActiveRoute`] per entry.
//! Keeping the steps separate lets the controller store assignments as the
//! single source of truth and re-join them on every read.

use crate::mocks::store::DefinitionStore;
use crate::types::preset::{MapOrExpression, Preset, ValueOrExpression};
use crate::types::route::{HttpMethod, Route, RouteReference, Transport, VariantRef};
use crate::types::variant::Variant;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Flattened route assignments of a resolved collection.
///
/// Iteration order is the activation order: the collection's own entries in
/// file order, then inherited entries in the parent's resolved order.
pub type AssignmentMap = IndexMap<String, VariantRef>;

/// Errors that can occur while resolving collections or route references
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Collection not found
    #[error("collection not found: {collection_id}")]
    CollectionNotFound { collection_id: String },
    /// Route not found
    #[error("route not found: {route_id}")]
    RouteNotFound { route_id: String },
    /// Preset not found in route
    #[error("preset '{preset_id}' not found in route '{route_id}'")]
    PresetNotFound { route_id: String, preset_id: String },
    /// Variant not found in preset
    #[error("variant '{variant_id}' not found in preset '{preset_id}' of route '{route_id}'")]
    VariantNotFound {
        route_id: String,
        preset_id: String,
        variant_id: String,
    },
    /// Invalid route reference format
    #[error("invalid route reference format: {reference}")]
    InvalidRouteReference { reference: String },
    /// A collection's `from` chain revisits a collection
    #[error("inheritance cycle detected at collection '{collection_id}' (chain: {})", .chain.join(" -> "))]
    InheritanceCycle {
        collection_id: String,
        chain: Vec<String>,
    },
    /// Route transport does not match the requested operation
    #[error("route '{route_id}' is a {actual} route; use '{}' to activate it", .actual.activation_op())]
    TransportMismatch {
        route_id: String,
        expected: Transport,
        actual: Transport,
    },
}

/// Route view inside an [`ActiveRoute`]: the definition without its presets.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub id: String,
    pub url: String,
    pub transport: Transport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id.clone(),
            url: route.url.clone(),
            transport: route.transport(),
            method: route.method(),
        }
    }
}

/// Preset view inside an [`ActiveRoute`]: matching conditions without the
/// variant list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PresetSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<MapOrExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<MapOrExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<MapOrExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ValueOrExpression>,
}

impl From<&Preset> for PresetSummary {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id.clone(),
            params: preset.params.clone(),
            query: preset.query.clone(),
            headers: preset.headers.clone(),
            payload: preset.payload.clone(),
        }
    }
}

/// Fully resolved route: the definition joined with its selected preset and
/// variant.
///
/// Matching conditions and the response variant are carried through exactly
/// as defined; nothing is evaluated here.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActiveRoute {
    /// Route definition summary
    pub route: RouteSummary,
    /// Selected preset conditions
    pub preset: PresetSummary,
    /// Selected response variant
    pub variant: Variant,
}

/// Resolve a collection into its flattened assignment map.
///
/// Walks the inheritance chain declared via `from`. A collection's own
/// entries always win over inherited ones; within one collection a later
/// entry for the same route id wins while keeping the position of the first.
pub fn resolve(
    collection_id: &str,
    store: &DefinitionStore,
) -> Result<AssignmentMap, ResolveError> {
    let mut path = Vec::new();
    resolve_chain(collection_id, store, &mut path)
}

fn resolve_chain(
    collection_id: &str,
    store: &DefinitionStore,
    path: &mut Vec<String>,
) -> Result<AssignmentMap, ResolveError> {
    if path.iter().any(|visited| visited == collection_id) {
        let mut chain = path.clone();
        chain.push(collection_id.to_string());
        return Err(ResolveError::InheritanceCycle {
            collection_id: collection_id.to_string(),
            chain,
        });
    }

    let collection =
        store
            .collection(collection_id)
            .ok_or_else(|| ResolveError::CollectionNotFound {
                collection_id: collection_id.to_string(),
            })?;

    let mut assignments = AssignmentMap::new();
    for entry in &collection.routes {
        let reference =
            RouteReference::parse(entry).ok_or_else(|| ResolveError::InvalidRouteReference {
                reference: entry.clone(),
            })?;
        let (route_id, variant_ref) = reference.into_assignment();
        // Within one collection the last entry for a route id wins; insert
        // keeps the position of the first, so own entries stay in file order.
        assignments.insert(route_id, variant_ref);
    }

    if let Some(parent_id) = &collection.from {
        path.push(collection_id.to_string());
        let inherited = resolve_chain(parent_id, store, path)?;
        path.pop();

        for (route_id, variant_ref) in inherited {
            // Entries defined closer to the resolved collection win.
            assignments.entry(route_id).or_insert(variant_ref);
        }
    }

    Ok(assignments)
}

/// Join an assignment map against the definition store.
///
/// Produces one [`ActiveRoute`] per assignment, in map iteration order.
pub fn materialize(
    assignments: &AssignmentMap,
    store: &DefinitionStore,
) -> Result<Vec<ActiveRoute>, ResolveError> {
    assignments
        .iter()
        .map(|(route_id, variant_ref)| {
            let (route, preset, variant) = lookup(store, route_id, variant_ref)?;
            Ok(ActiveRoute {
                route: RouteSummary::from(route),
                preset: PresetSummary::from(preset),
                variant: variant.clone(),
            })
        })
        .collect()
}

/// Look up the definition triple behind an assignment entry.
pub(crate) fn lookup<'a>(
    store: &'a DefinitionStore,
    route_id: &str,
    variant_ref: &VariantRef,
) -> Result<(&'a Route, &'a Preset, &'a Variant), ResolveError> {
    let route = store.route(route_id).ok_or_else(|| ResolveError::RouteNotFound {
        route_id: route_id.to_string(),
    })?;

    let preset = route
        .presets
        .iter()
        .find(|p| p.id == variant_ref.preset_id)
        .ok_or_else(|| ResolveError::PresetNotFound {
            route_id: route_id.to_string(),
            preset_id: variant_ref.preset_id.clone(),
        })?;

    let variant = preset
        .variants
        .iter()
        .find(|v| v.id == variant_ref.variant_id)
        .ok_or_else(|| ResolveError::VariantNotFound {
            route_id: route_id.to_string(),
            preset_id: variant_ref.preset_id.clone(),
            variant_id: variant_ref.variant_id.clone(),
        })?;

    Ok((route, preset, variant))
}

/// Validate a route reference string against the store and an expected
/// transport, returning the assignment pair it denotes.
///
/// Nothing is mutated here, so callers can stage a whole batch of
/// references and commit only once every one of them checked out.
pub(crate) fn validate_reference(
    store: &DefinitionStore,
    reference: &str,
    expected: Transport,
) -> Result<(String, VariantRef), ResolveError> {
    let parsed =
        RouteReference::parse(reference).ok_or_else(|| ResolveError::InvalidRouteReference {
            reference: reference.to_string(),
        })?;
    let (route_id, variant_ref) = parsed.into_assignment();

    let (route, _, _) = lookup(store, &route_id, &variant_ref)?;
    let actual = route.transport();
    if actual != expected {
        return Err(ResolveError::TransportMismatch {
            route_id,
            expected,
            actual,
        });
    }

    Ok((route_id, variant_ref))
}
