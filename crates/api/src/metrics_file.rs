//! Reading the metrics document from disk.

use std::path::Path;

use serde_json::Value;

use crate::error::{MetricsFileError, Result};

/// Loads the metrics document at `path` as an uninterpreted JSON value.
///
/// A path that cannot be probed counts as absent. The file is opened,
/// read in full and closed before parsing, so the handle is released on
/// every path including a parse failure.
pub async fn read(path: &Path) -> Result<Value> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(MetricsFileError::NotFound);
    }

    let bytes = tokio::fs::read(path).await?;
    let document = serde_json::from_slice(&bytes)?;
    Ok(document)
}
