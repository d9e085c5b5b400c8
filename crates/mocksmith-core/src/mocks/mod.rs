//! Mocks management module.
//!
//! This module provides the resolution engine behind the mock server:
//! - [`store::DefinitionStore`]: immutable route/collection definitions keyed by id
//! - [`resolver`]: inheritance flattening and assignment materialization
//! - [`manager::MocksManager`]: stateless collection resolution
//! - [`controller::MocksController`]: stateful selection with ad-hoc route overrides

pub mod controller;
pub mod manager;
pub mod resolver;
pub mod store;
