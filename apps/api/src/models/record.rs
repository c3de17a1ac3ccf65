use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored CV. `data` holds the serialized `CvFormData`.
#[derive(Debug, Clone, FromRow)]
pub struct CvRow {
    pub user_id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
