use crate::error::{PipelineError, Result};

/// The last three `/` components of a storage path: `<guid>/<container>/<file>`.
pub fn build_url(storage_path: &str) -> Result<String> {
    let parts: Vec<&str> = storage_path.split('/').collect();
    if parts.len() < 3 {
        return Err(PipelineError::MalformedOutputPath(storage_path.to_string()));
    }
    Ok(parts[parts.len() - 3..].join("/"))
}

/// CDN URL serving the object at `storage_path`.
pub fn public_url(cdn_host: &str, storage_path: &str) -> Result<String> {
    Ok(format!("https://{}/{}", cdn_host, build_url(storage_path)?))
}
