//! # Voxa Runtime
//!
//! Registries and dispatch engine for the Voxa assistant. The runtime
//! owns the catalog of tools and agents, aggregates the function set
//! advertised to the language model, and routes model-issued calls to
//! implementations with scope enforcement, deadlines, credit debits, and
//! transcript appends.
//!
//! Registries are explicit objects constructed once at startup and injected
//! into the [`Dispatcher`]: no process-wide singletons, so tests and
//! concurrent sessions get isolated instances.

pub mod agent_registry;
pub mod config;
pub mod dispatcher;
pub mod swap;
pub mod tool_registry;

pub use agent_registry::AgentRegistry;
pub use config::{ConfigError, RuntimeConfig};
pub use dispatcher::{Dispatcher, ToolInvocation};
pub use swap::{SWAP_TOOL_NAME, swap_schema, swap_tool_key};
pub use tool_registry::ToolRegistry;
