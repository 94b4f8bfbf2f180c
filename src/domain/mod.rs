//! Domain layer - Pure business logic.

pub mod job;
pub mod media;
pub mod outputs;
pub mod profile;
pub mod workflow;
