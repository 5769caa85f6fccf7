//! Search index adapter. Keeps a denormalized, queryable copy of each
//! permission record in Elasticsearch. The index is derived state: never the
//! system of record, rebuildable from the store.

use crate::errors::FurloughError;
use crate::settings::Search as SearchCfg;
use crate::storage::Permission;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Flattened projection of a permission record held by the index.
/// The type description is intentionally not carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDocument {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub type_code: i32,
    pub permission_date: i64,
}

impl From<&Permission> for PermissionDocument {
    fn from(record: &Permission) -> Self {
        Self {
            id: record.id,
            employee_first_name: record.employee_first_name.clone(),
            employee_last_name: record.employee_last_name.clone(),
            type_code: record.type_code,
            permission_date: record.permission_date,
        }
    }
}

/// Seam the write path drives. Upsert must be idempotent: writing the same
/// id with the same content twice leaves the index observably unchanged.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn ensure_index(&self) -> Result<(), FurloughError>;
    async fn upsert(&self, doc: &PermissionDocument) -> Result<(), FurloughError>;
    async fn delete(&self, id: i32) -> Result<bool, FurloughError>;
}

/// Elasticsearch implementation over the REST API.
#[derive(Clone)]
pub struct EsIndex {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl EsIndex {
    pub fn new(cfg: &SearchCfg) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: cfg.url.trim_end_matches('/').to_string(),
            index: cfg.index.clone(),
        }
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    fn doc_url(&self, id: i32) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, id)
    }
}

#[async_trait]
impl SearchIndex for EsIndex {
    /// Create the index with an explicit mapping if it does not exist yet.
    async fn ensure_index(&self) -> Result<(), FurloughError> {
        let resp = self
            .http
            .head(self.index_url())
            .send()
            .await
            .map_err(|e| FurloughError::Index(format!("index existence check failed: {e}")))?;

        if resp.status().is_success() {
            return Ok(());
        }
        if resp.status().as_u16() != 404 {
            return Err(FurloughError::Index(format!(
                "index existence check returned {}",
                resp.status()
            )));
        }

        let mapping = json!({
            "mappings": {
                "properties": {
                    "id": { "type": "integer" },
                    "employee_first_name": { "type": "text" },
                    "employee_last_name": { "type": "text" },
                    "type_code": { "type": "integer" },
                    "permission_date": { "type": "date", "format": "epoch_second" }
                }
            }
        });

        let resp = self
            .http
            .put(self.index_url())
            .json(&mapping)
            .send()
            .await
            .map_err(|e| FurloughError::Index(format!("index creation failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FurloughError::Index(format!(
                "index creation returned {status}: {body}"
            )));
        }

        tracing::info!(index = %self.index, "Created search index");
        Ok(())
    }

    async fn upsert(&self, doc: &PermissionDocument) -> Result<(), FurloughError> {
        self.ensure_index().await?;

        // PUT with the record id overwrites any prior version of the document
        let resp = self
            .http
            .put(self.doc_url(doc.id))
            .json(doc)
            .send()
            .await
            .map_err(|e| FurloughError::Index(format!("document write failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FurloughError::Index(format!(
                "document write returned {status}: {body}"
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, FurloughError> {
        let resp = self
            .http
            .delete(self.doc_url(id))
            .send()
            .await
            .map_err(|e| FurloughError::Index(format!("document delete failed: {e}")))?;

        match resp.status().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(FurloughError::Index(format!(
                    "document delete returned {status}: {body}"
                )))
            }
        }
    }
}
