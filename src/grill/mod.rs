//! Conventions shared with the grill's automation controller.
//!
//! None of this is enforced by the pub/sub core. It collects the topic names
//! the controller serves, typed helpers for the commands the UI sends, and
//! decoders for the telemetry it pushes back.

pub mod commands;
pub mod plan;
pub mod telemetry;
pub mod topics;

pub use commands::GrillCommands;
pub use plan::{CookPlan, PlanError, StageSettings, Stages};
pub use telemetry::{HistorySession, SystemInfo};
