//! Application layer - One service per workflow stage, generic over ports.

pub mod encoder;
pub mod output_validator;
pub mod profiler;

pub use encoder::EncodeService;
pub use output_validator::OutputValidateService;
pub use profiler::{ProfilerRequest, ProfilerService};
