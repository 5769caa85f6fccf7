//! Write/read orchestration over the store, the search index, and the event
//! stream. The store commit is the durability boundary: index and event
//! steps run strictly after it and are not part of the same atomic unit. If
//! one of them fails the committed row stays authoritative, the caller gets
//! the failure, and the index/stream lag behind until the next successful
//! write or an out-of-band repair. There is no retry, rollback, or outbox.

use crate::errors::FurloughError;
use crate::events::{EventSink, OperationKind};
use crate::search::SearchIndex;
use crate::storage::{self, NewPermission, Permission};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Partial update. A field is applied only when present; blank name fields
/// count as absent. Everything not applied keeps its stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionPatch {
    pub employee_first_name: Option<String>,
    pub employee_last_name: Option<String>,
    pub type_code: Option<i32>,
    pub permission_date: Option<i64>,
}

#[derive(Clone)]
pub struct Orchestrator {
    db: DatabaseConnection,
    index: Arc<dyn SearchIndex>,
    events: Arc<dyn EventSink>,
}

impl Orchestrator {
    pub fn new(
        db: DatabaseConnection,
        index: Arc<dyn SearchIndex>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self { db, index, events }
    }

    /// Create a permission record: validate the type code, persist, re-read
    /// the committed row, then propagate to the index and the event stream.
    pub async fn request_permission(
        &self,
        input: NewPermission,
    ) -> Result<Permission, FurloughError> {
        if !storage::permission_type_exists(&self.db, input.type_code).await? {
            return Err(FurloughError::InvalidReference(input.type_code));
        }

        let inserted = storage::create_permission(&self.db, &input).await?;

        // Re-read what was actually committed, joined with the description.
        // A missing row here is an internal bug, not a user error.
        let record = storage::get_permission(&self.db, inserted.id)
            .await?
            .ok_or(FurloughError::InconsistentState(inserted.id))?;

        self.index.upsert(&(&record).into()).await?;
        self.events.publish(OperationKind::Request).await?;

        tracing::info!(id = record.id, "Created permission");
        Ok(record)
    }

    /// Apply a field-level merge to an existing record. Returns `Ok(None)`
    /// when the id is unknown; an empty patch is a legal no-op persist that
    /// still re-indexes and publishes.
    pub async fn modify_permission(
        &self,
        id: i32,
        patch: PermissionPatch,
    ) -> Result<Option<Permission>, FurloughError> {
        let Some(mut record) = storage::get_permission(&self.db, id).await? else {
            return Ok(None);
        };

        if let Some(first_name) = patch.employee_first_name.filter(|s| !s.trim().is_empty()) {
            record.employee_first_name = first_name;
        }
        if let Some(last_name) = patch.employee_last_name.filter(|s| !s.trim().is_empty()) {
            record.employee_last_name = last_name;
        }
        if let Some(type_code) = patch.type_code {
            // Validate the new reference before mutating anything
            if !storage::permission_type_exists(&self.db, type_code).await? {
                return Err(FurloughError::InvalidReference(type_code));
            }
            record.type_code = type_code;
        }
        if let Some(permission_date) = patch.permission_date {
            record.permission_date = permission_date;
        }

        storage::update_permission(&self.db, &record).await?;

        let record = storage::get_permission(&self.db, id)
            .await?
            .ok_or(FurloughError::InconsistentState(id))?;

        // The index always reflects the full post-merge record
        self.index.upsert(&(&record).into()).await?;
        self.events.publish(OperationKind::Modify).await?;

        tracing::info!(id = record.id, "Modified permission");
        Ok(Some(record))
    }

    /// Read all records from the store, then announce the read. A failed
    /// announce fails the call; the store is the sole read source, the
    /// index is never consulted here.
    pub async fn list_permissions(&self) -> Result<Vec<Permission>, FurloughError> {
        let records = storage::list_permissions(&self.db).await?;
        self.events.publish(OperationKind::Get).await?;
        Ok(records)
    }

    pub async fn list_permission_types(
        &self,
    ) -> Result<Vec<storage::PermissionType>, FurloughError> {
        storage::list_permission_types(&self.db).await
    }
}
