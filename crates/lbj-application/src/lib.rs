//! Application layer for the LBJ orchestrator.
//!
//! This crate provides the session use case that coordinates the provider
//! binding, the message log and the specialist status grid.

pub mod session_usecase;
pub mod status_scheduler;

pub use session_usecase::{OrchestratorSession, SessionConfig, SubmitOutcome};
pub use status_scheduler::StatusResetScheduler;
