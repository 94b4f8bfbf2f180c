//! Vodflow - Video-on-demand transcoding workflow
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (media, profile, job, outputs, workflow)
//! - ports/: Trait definitions
//! - adapters/: Concrete implementations
//! - application/: Generic services, one per workflow stage
//! - config: Environment configuration
//!
//! # Features
//! - `aws`: MediaConvert, S3 and DynamoDB adapters plus the Lambda entry points

#[cfg(feature = "aws")]
pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod telemetry;

// Re-exports for convenience
pub use config::WorkflowConfig;
pub use error::{ErrorKind, Operation, PipelineError};
