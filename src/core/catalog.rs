use crate::core::{ApiOperation, CatalogSnapshot, DocumentRefresher};
use crate::utils::error::{LoaderError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// In-memory catalog of the operations described by the latest OpenAPI document.
///
/// A document that fails to parse leaves the previous snapshot untouched.
#[derive(Default)]
pub struct OperationCatalog {
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl OperationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl DocumentRefresher for OperationCatalog {
    async fn refresh(&self, document: String) -> Result<()> {
        let snapshot = parse_document(&document)?;
        tracing::debug!(
            spec_version = %snapshot.spec_version,
            operations = snapshot.operations.len(),
            "Operation catalog rebuilt"
        );

        *self.snapshot.write().await = Some(Arc::new(snapshot));
        Ok(())
    }
}

pub fn parse_document(document: &str) -> Result<CatalogSnapshot> {
    let root: Value = serde_json::from_str(document)?;
    let root = root
        .as_object()
        .ok_or_else(|| LoaderError::refresh("document root must be a JSON object"))?;

    // Swagger 2.0 文件使用 "swagger" 欄位
    let spec_version = root
        .get("openapi")
        .or_else(|| root.get("swagger"))
        .and_then(Value::as_str)
        .ok_or_else(|| LoaderError::refresh("missing 'openapi' version field"))?
        .to_string();

    let paths = root
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| LoaderError::refresh("missing 'paths' object"))?;

    let title = root
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for method in HTTP_METHODS {
            if let Some(Value::Object(operation)) = item.get(method) {
                operations.push(to_operation(method, path, operation));
            }
        }
    }

    Ok(CatalogSnapshot {
        spec_version,
        title,
        operations,
        loaded_at: Utc::now(),
    })
}

fn to_operation(method: &str, path: &str, operation: &Map<String, Value>) -> ApiOperation {
    let text = |key: &str| {
        operation
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    ApiOperation {
        method: method.to_ascii_uppercase(),
        path: path.to_string(),
        operation_id: text("operationId"),
        summary: text("summary").or_else(|| text("description")),
        tags: operation
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
