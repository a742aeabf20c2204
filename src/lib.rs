//! Blockshot (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockshot::{types, core, adapter}` so
//! hosts, integration tests and benches depend on a single package.

pub use blockshot_adapter as adapter;
pub use blockshot_core as core;
pub use blockshot_types as types;
