//! # Audit Log Repository
//!
//! Append-only access to `audit_logs`. Entries can be recorded and queried but
//! this repository offers no way to change or remove them.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::AuditLog;
use crate::models::audit_log::{ActiveModel, Column, Model};

const MAX_EVENT_LEN: usize = 64;
const MAX_IP_ADDRESS_LEN: usize = 45;

/// A single audited change
#[derive(Debug, Clone, Default)]
pub struct NewAuditEntry {
    pub user_id: Option<Uuid>,
    pub event: String,
    pub auditable_type: String,
    pub auditable_id: Option<Uuid>,
    pub old_values: Option<JsonValue>,
    pub new_values: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub url: Option<String>,
}

pub struct AuditLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, entry: NewAuditEntry) -> RepositoryResult<Model> {
        if entry.event.is_empty() || entry.event.len() > MAX_EVENT_LEN {
            return Err(RepositoryError::validation_error(format!(
                "event must be 1 to {MAX_EVENT_LEN} characters"
            )));
        }
        if entry.auditable_type.is_empty() {
            return Err(RepositoryError::validation_error(
                "auditable type cannot be empty",
            ));
        }
        if entry
            .ip_address
            .as_ref()
            .is_some_and(|ip| ip.len() > MAX_IP_ADDRESS_LEN)
        {
            return Err(RepositoryError::validation_error("ip address is too long"));
        }

        let log = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            event: Set(entry.event),
            auditable_type: Set(entry.auditable_type),
            auditable_id: Set(entry.auditable_id),
            old_values: Set(entry.old_values),
            new_values: Set(entry.new_values),
            ip_address: Set(entry.ip_address),
            user_agent: Set(entry.user_agent),
            url: Set(entry.url),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let created = log
            .insert(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "recording audit entry"))?;

        tracing::debug!(
            audit_id = %created.id,
            event = %created.event,
            auditable_type = %created.auditable_type,
            "Recorded audit entry"
        );
        Ok(created)
    }

    /// History of one record, newest first
    pub async fn for_auditable(
        &self,
        auditable_type: &str,
        auditable_id: Uuid,
    ) -> RepositoryResult<Vec<Model>> {
        AuditLog::find()
            .filter(Column::AuditableType.eq(auditable_type))
            .filter(Column::AuditableId.eq(auditable_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading audit history"))
    }

    /// Everything a user did, newest first
    pub async fn for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Model>> {
        AuditLog::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await
            .map_err(|e| RepositoryError::from_db(e, "loading user audit trail"))
    }
}
