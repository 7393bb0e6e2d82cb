//! Mutation engine and reorder coordinator.

mod engine;
pub mod reorder;

pub use engine::Editor;
