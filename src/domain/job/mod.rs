//! Job specification builder: template groups overlaid onto catalogue defaults.

pub mod builder;
pub mod catalogue;
pub mod merge;
pub mod spec;

pub use builder::build_job_specification;
pub use spec::{
    AccelerationMode, GroupKind, JobContext, JobSpecification, JobTemplate, OutputGroupSpec,
    TimecodeSource,
};
