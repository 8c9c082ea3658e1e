//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `pipeline.rs` — watch/sparse/dense reconstruction commands.
//! - `inspect.rs` — workspace status and scanner control commands.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate pipeline logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod pipeline;

pub use inspect::handle_inspect_commands;
pub use pipeline::handle_pipeline_commands;
