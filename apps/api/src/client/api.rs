//! HTTP client for the CV endpoints.
//!
//! Every response body is wrapped as `{ "data": ... }`. A 404 maps to
//! `ApiError::NotFound` so callers can tell "no such CV" from a failure.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::CvFormData;

pub const SUBMIT_PATH: &str = "/api/cvgen/submitCV";
pub const UPDATE_PATH: &str = "/api/cvgen/updateCV";
pub const FETCH_PATH: &str = "/api/cvedit/fetchCV";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("CV not found")]
    NotFound,

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdPayload {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedCv {
    pub user_id: Uuid,
    pub cv: CvFormData,
}

#[async_trait]
pub trait CvApi: Send + Sync {
    /// Creates a CV and returns the server-assigned user id.
    async fn submit_cv(&self, cv: &CvFormData) -> Result<Uuid, ApiError>;
    async fn update_cv(&self, user_id: Uuid, cv: &CvFormData) -> Result<Uuid, ApiError>;
    async fn fetch_cv(&self, user_id: Uuid) -> Result<FetchedCv, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpCvApi {
    client: Client,
    base_url: String,
}

impl HttpCvApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body = response.text().await?;
        if !status.is_success() {
            warn!("CV API returned {status}: {body}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CvApi for HttpCvApi {
    async fn submit_cv(&self, cv: &CvFormData) -> Result<Uuid, ApiError> {
        debug!("POST {SUBMIT_PATH}");
        let response = self.client.post(self.url(SUBMIT_PATH)).json(cv).send().await?;
        let payload: UserIdPayload = Self::read(response).await?;
        Ok(payload.user_id)
    }

    async fn update_cv(&self, user_id: Uuid, cv: &CvFormData) -> Result<Uuid, ApiError> {
        debug!("PUT {UPDATE_PATH} user_id={user_id}");
        let response = self
            .client
            .put(self.url(UPDATE_PATH))
            .query(&[("userId", user_id.to_string())])
            .json(cv)
            .send()
            .await?;
        let payload: UserIdPayload = Self::read(response).await?;
        Ok(payload.user_id)
    }

    async fn fetch_cv(&self, user_id: Uuid) -> Result<FetchedCv, ApiError> {
        debug!("GET {FETCH_PATH} user_id={user_id}");
        let response = self
            .client
            .get(self.url(FETCH_PATH))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpCvApi::new("http://localhost:8080/");
        assert_eq!(api.url(SUBMIT_PATH), "http://localhost:8080/api/cvgen/submitCV");
    }

    #[test]
    fn test_user_id_envelope_shape() {
        let id = Uuid::new_v4();
        let body = json!({ "data": { "userId": id } });
        let env: ApiEnvelope<UserIdPayload> = serde_json::from_value(body).unwrap();
        assert_eq!(env.data.user_id, id);
    }
}
