pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::client::api::{FETCH_PATH, SUBMIT_PATH, UPDATE_PATH};
use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(SUBMIT_PATH, post(handlers::handle_submit_cv))
        .route(UPDATE_PATH, put(handlers::handle_update_cv))
        .route(FETCH_PATH, get(handlers::handle_fetch_cv))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::client::api::{ApiError, CvApi, HttpCvApi};
    use crate::config::Config;
    use crate::cv::InMemoryCvRepository;
    use crate::i18n::{Catalog, Locale};
    use crate::submission::SubmissionAssembler;
    use crate::wizard::schema::tests::complete_cv;
    use crate::wizard::schema::StandardSchema;

    pub(crate) fn test_state() -> AppState {
        AppState {
            repo: Arc::new(InMemoryCvRepository::new()),
            assembler: Arc::new(SubmissionAssembler::new(
                Arc::new(StandardSchema),
                Arc::new(Catalog::new(Locale::En)),
            )),
            config: Config {
                database_url: None,
                port: 0,
                rust_log: "info".into(),
            },
        }
    }

    /// Serves the router on an ephemeral port and returns its base URL.
    pub(crate) async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_router(test_state());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "cvgen-api");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_bad_user_id_is_bad_request() {
        let app = build_router(test_state());

        let (status, body) =
            call(&app, Method::GET, "/api/cvedit/fetchCV?userId=not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/cvgen/updateCV",
            Some(serde_json::to_value(complete_cv()).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_submit_then_fetch() {
        let app = build_router(test_state());
        let cv = serde_json::to_value(complete_cv()).unwrap();

        let (status, body) = call(&app, Method::POST, "/api/cvgen/submitCV", Some(cv)).await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["data"]["userId"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/cvedit/fetchCV?userId={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["userId"], user_id.as_str());
        assert_eq!(body["data"]["cv"]["personalInfo"]["firstname"], "Jean");
    }

    #[tokio::test]
    async fn test_submit_without_languages_is_unprocessable() {
        let app = build_router(test_state());
        let mut cv = complete_cv();
        cv.languages.clear();

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/cvgen/submitCV",
            Some(serde_json::to_value(cv).unwrap()),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["issues"][0],
            json!({
                "path": "languages",
                "label": "Languages",
                "message": "At least one language is required"
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = build_router(test_state());
        let stranger = Uuid::new_v4();

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/cvedit/fetchCV?userId={stranger}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/api/cvgen/updateCV?userId={stranger}"),
            Some(serde_json::to_value(complete_cv()).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let app = build_router(test_state());
        let (_, body) = call(
            &app,
            Method::POST,
            "/api/cvgen/submitCV",
            Some(serde_json::to_value(complete_cv()).unwrap()),
        )
        .await;
        let user_id = body["data"]["userId"].as_str().unwrap().to_string();

        let mut edited = complete_cv();
        edited.personal_info.firstname = "Jeanne".into();
        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/api/cvgen/updateCV?userId={user_id}"),
            Some(serde_json::to_value(edited).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["userId"], user_id.as_str());

        let (_, body) = call(
            &app,
            Method::GET,
            &format!("/api/cvedit/fetchCV?userId={user_id}"),
            None,
        )
        .await;
        assert_eq!(body["data"]["cv"]["personalInfo"]["firstname"], "Jeanne");
    }

    #[tokio::test]
    async fn test_http_client_against_server() {
        let api = HttpCvApi::new(spawn_server().await);

        let user_id = api.submit_cv(&complete_cv()).await.unwrap();
        let fetched = api.fetch_cv(user_id).await.unwrap();
        assert_eq!(fetched.user_id, user_id);
        assert_eq!(fetched.cv.personal_info.lastname, "Dupont");

        assert!(matches!(
            api.fetch_cv(Uuid::new_v4()).await,
            Err(ApiError::NotFound)
        ));

        let mut cv = complete_cv();
        cv.languages.clear();
        assert!(matches!(
            api.submit_cv(&cv).await,
            Err(ApiError::Status { status: 422, .. })
        ));
    }
}
