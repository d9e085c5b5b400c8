//! Resolution engine behind the Mocksmith API mock tool.
//!
//! Definition files on disk describe *routes* (HTTP and WebSocket endpoints
//! with matching presets and response variants) and *collections* (named,
//! optionally inheriting lists of `route:preset:variant` references). This
//! crate loads them once into an immutable
//! [`DefinitionStore`](mocks::store::DefinitionStore), flattens collections
//! through their `from` chains, and exposes two entry points:
//! [`MocksManager`](mocks::manager::MocksManager) for stateless resolution
//! and [`MocksController`](mocks::controller::MocksController) for switching
//! the active mock state at runtime.
//!
//! Matching incoming traffic against preset conditions and serving the
//! variant responses belong to the layers above; conditions and bodies are
//! carried through verbatim.

pub mod config;
pub mod error;
pub mod expression;
pub mod mocks;
pub mod types;

pub use error::Error;
pub use mocks::controller::MocksController;
pub use mocks::manager::MocksManager;
pub use mocks::resolver::ActiveRoute;
pub use mocks::store::DefinitionStore;
