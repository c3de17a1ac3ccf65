use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::record::CvRow;
use crate::models::CvFormData;

/// Storage for submitted CVs, one per user id.
#[async_trait]
pub trait CvRepository: Send + Sync {
    /// Stores a new CV under a fresh user id.
    async fn create(&self, cv: &CvFormData) -> Result<Uuid, AppError>;

    /// Replaces an existing CV. `false` when there is none for `user_id`.
    async fn update(&self, user_id: Uuid, cv: &CvFormData) -> Result<bool, AppError>;

    async fn fetch(&self, user_id: Uuid) -> Result<Option<CvFormData>, AppError>;
}

fn decode(row: CvRow) -> Result<CvFormData, AppError> {
    serde_json::from_value(row.data).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Stored CV for {} is unreadable: {e}", row.user_id))
    })
}

pub struct PgCvRepository {
    pool: PgPool,
}

impl PgCvRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvRepository for PgCvRepository {
    async fn create(&self, cv: &CvFormData) -> Result<Uuid, AppError> {
        let user_id = Uuid::new_v4();
        sqlx::query("INSERT INTO cvs (user_id, data) VALUES ($1, $2)")
            .bind(user_id)
            .bind(Json(cv))
            .execute(&self.pool)
            .await?;
        Ok(user_id)
    }

    async fn update(&self, user_id: Uuid, cv: &CvFormData) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE cvs SET data = $1, updated_at = now() WHERE user_id = $2")
            .bind(Json(cv))
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<CvFormData>, AppError> {
        let row: Option<CvRow> = sqlx::query_as("SELECT * FROM cvs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(decode).transpose()
    }
}

/// Process-local repository used when no database is configured.
#[derive(Default)]
pub struct InMemoryCvRepository {
    rows: RwLock<HashMap<Uuid, CvRow>>,
}

impl InMemoryCvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(cv: &CvFormData) -> Result<serde_json::Value, AppError> {
        serde_json::to_value(cv).map_err(|e| AppError::Internal(e.into()))
    }
}

#[async_trait]
impl CvRepository for InMemoryCvRepository {
    async fn create(&self, cv: &CvFormData) -> Result<Uuid, AppError> {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let row = CvRow {
            user_id,
            data: Self::encode(cv)?,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.insert(user_id, row);
        Ok(user_id)
    }

    async fn update(&self, user_id: Uuid, cv: &CvFormData) -> Result<bool, AppError> {
        let data = Self::encode(cv)?;
        let mut rows = self.rows.write().await;
        match rows.get_mut(&user_id) {
            Some(row) => {
                row.data = data;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<CvFormData>, AppError> {
        let row = self.rows.read().await.get(&user_id).cloned();
        row.map(decode).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::schema::tests::complete_cv;

    #[tokio::test]
    async fn test_in_memory_create_update_fetch() {
        let repo = InMemoryCvRepository::new();
        let user_id = repo.create(&complete_cv()).await.unwrap();
        assert_eq!(repo.fetch(user_id).await.unwrap(), Some(complete_cv()));

        let mut edited = complete_cv();
        edited.personal_info.firstname = "Jeanne".into();
        assert!(repo.update(user_id, &edited).await.unwrap());
        let fetched = repo.fetch(user_id).await.unwrap().unwrap();
        assert_eq!(fetched.personal_info.firstname, "Jeanne");
    }

    #[tokio::test]
    async fn test_in_memory_unknown_user() {
        let repo = InMemoryCvRepository::new();
        let stranger = Uuid::new_v4();
        assert!(!repo.update(stranger, &complete_cv()).await.unwrap());
        assert_eq!(repo.fetch(stranger).await.unwrap(), None);
    }
}
