use crate::core::catalog::OperationCatalog;
use crate::core::loader::OpenApiLoader;
use crate::core::LoadOutcome;
use crate::utils::error::{LoaderError, Result};

/// Exit status of a single-run invocation whose load failed.
pub const ONCE_FAILURE_EXIT_CODE: i32 = 2;

/// Runs one load and renders the refreshed catalog as pretty JSON.
pub async fn run_once(
    loader: &OpenApiLoader<OperationCatalog>,
    catalog: &OperationCatalog,
) -> Result<String> {
    match loader.load().await {
        LoadOutcome::Refreshed { .. } => {
            let snapshot = catalog
                .current()
                .await
                .ok_or_else(|| LoaderError::refresh("catalog is empty after refresh"))?;
            Ok(serde_json::to_string_pretty(snapshot.as_ref())?)
        }
        LoadOutcome::Failed(e) => Err(e),
    }
}
