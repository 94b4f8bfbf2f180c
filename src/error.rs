//! Pipeline error taxonomy.
//!
//! Every failure surfaced by a stage is a `PipelineError`. Each variant belongs to exactly
//! one [`ErrorKind`], and failures of external collaborators also carry the
//! [`Operation`] that failed, so a caller can branch on both without knowing internals.

use std::error::Error as StdError;
use std::fmt;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Coarse classification used by callers to decide whether to retry, alert or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    ExternalService,
    DataConsistency,
    Merge,
}

/// External operation a collaborator failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetJobTemplate,
    CreateJob,
    ListObjects,
    GetWorkflow,
    SaveOutputs,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetJobTemplate => "GetJobTemplate",
            Operation::CreateJob => "CreateJob",
            Operation::ListObjects => "ListObjects",
            Operation::GetWorkflow => "GetWorkflow",
            Operation::SaveOutputs => "SaveOutputs",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("media descriptor has no video stream")]
    NoVideoStream,

    #[error("workflow {0} has no media info report")]
    MissingMediaInfo(String),

    #[error("invalid media info report: {0}")]
    InvalidMediaInfo(#[source] serde_json::Error),

    #[error("completion report declares no output groups")]
    NoOutputGroups,

    #[error("invalid event payload: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    #[error("no workflow found for guid {0}")]
    WorkflowNotFound(String),

    #[error("{operation} failed: {source}")]
    ExternalService {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    #[error("unknown output group type: {0}")]
    UnknownOutputGroupType(String),

    #[error("{group} output group has no playlist at index {index}")]
    MissingPlaylist { group: &'static str, index: usize },

    #[error("no thumbnails found under {prefix}")]
    NoThumbnailsFound { prefix: String },

    #[error("output path {0} has fewer than three components")]
    MalformedOutputPath(String),

    #[error("failed to merge template group onto {group} default: {source}")]
    Merge {
        group: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required configuration: {0}")]
    Config(&'static str),
}

impl PipelineError {
    pub fn external(operation: Operation, source: BoxError) -> Self {
        PipelineError::ExternalService { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::NoVideoStream
            | PipelineError::MissingMediaInfo(_)
            | PipelineError::InvalidMediaInfo(_)
            | PipelineError::NoOutputGroups
            | PipelineError::InvalidEvent(_)
            | PipelineError::WorkflowNotFound(_)
            | PipelineError::Config(_) => ErrorKind::InputValidation,
            PipelineError::ExternalService { .. } => ErrorKind::ExternalService,
            PipelineError::UnknownOutputGroupType(_)
            | PipelineError::MissingPlaylist { .. }
            | PipelineError::NoThumbnailsFound { .. }
            | PipelineError::MalformedOutputPath(_) => ErrorKind::DataConsistency,
            PipelineError::Merge { .. } => ErrorKind::Merge,
        }
    }

    /// The external operation that failed, if this is a collaborator failure.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            PipelineError::ExternalService { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
