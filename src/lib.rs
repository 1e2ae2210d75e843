//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_2048::{core,adapter,term,input,engine,types}`
//! so the binary, integration tests and benches use one import root.

pub use tui_2048_adapter as adapter;
pub use tui_2048_core as core;
pub use tui_2048_engine as engine;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
