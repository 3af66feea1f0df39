//! Threadprint Core — transport-agnostic pipeline logic.
//!
//! This crate contains the agents, providers, and orchestration for turning
//! a garment photo into a sustainability report. It has no CLI dependency,
//! making it suitable for use in:
//!
//! - the `threadprint` CLI
//! - batch jobs or services that embed the pipeline
//! - tests that inject scripted providers

pub mod agents;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod research;
pub mod search;

// Convenience re-exports
pub use config::Settings;
pub use error::{AgentError, StageFailure};
pub use models::PipelineResult;
pub use pipeline::Pipeline;
