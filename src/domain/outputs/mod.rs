//! Output resolution: completion report to storage paths and CDN URLs.

pub mod report;
pub mod resolver;
pub mod url;

pub use report::{CompletionReport, OutputGroupResult, ReportedGroupType};
pub use resolver::{latest_thumbnail, resolve_groups, ResolutionContext, ResolvedOutputs};
pub use url::{build_url, public_url};
