//! Commit-or-release around a record write.

use std::future::Future;

use ssahub_core::result::AppResult;
use ssahub_storage::StagedBlob;
use tracing::debug;

/// Run `persist` with the staged blob's locator (if any), then commit the
/// blob when the record write succeeded or release it when it failed.
pub(crate) async fn persist_staged<T, F, Fut>(staged: Option<StagedBlob>, persist: F) -> AppResult<T>
where
    F: FnOnce(Option<String>) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let locator = staged.as_ref().map(|s| s.locator().as_str().to_string());
    match persist(locator).await {
        Ok(record) => {
            if let Some(staged) = staged {
                staged.commit();
            }
            Ok(record)
        }
        Err(err) => {
            if let Some(staged) = staged {
                let outcome = staged.release().await;
                debug!(?outcome, error = %err, "Released staged blob after failed write");
            }
            Err(err)
        }
    }
}
