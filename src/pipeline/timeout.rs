//! Timeout helpers for pipeline operations

use std::future::Future;
use std::time::Duration;

use crate::types::{Result, StylebookError};

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within the specified duration.
///
/// # Example
///
/// ```ignore
/// let result = with_timeout(
///     Duration::from_secs(30),
///     async { parse_file(&path).await },
///     "parse app.css"
/// ).await?;
/// ```
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(StylebookError::timeout(operation_name, timeout)),
    }
}
