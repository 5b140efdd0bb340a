//! Block Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates as `block_arcade::{core,input,store,term,types}`
//! so the binary, integration tests and benches share one import path.

pub mod config;

pub use block_arcade_core as core;
pub use block_arcade_input as input;
pub use block_arcade_store as store;
pub use block_arcade_term as term;
pub use block_arcade_types as types;

pub use config::AppConfig;
