//! Bootstrap invocation endpoint
//!
//! The response is always `200 text/plain`: `"ok"` or `"Error: <message>"`.
//! Failures are recovered outcomes, not HTTP errors.

use axum::body::Bytes;
use axum::extract::State;
use axum::{routing::get, Router};

use crate::state::AppState;

/// GET / and POST / - create the database if absent
async fn invoke(State(state): State<AppState>, body: Bytes) -> String {
    dbinit_core::handle(state.config(), state.runner(), &body).await
}

/// Invocation routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(invoke).post(invoke))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use dbinit_core::{BootstrapError, DbConfig, Dialect, StatementRunner};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    #[derive(Default)]
    struct CountingRunner {
        calls: AtomicUsize,
        refuse: bool,
    }

    #[async_trait]
    impl StatementRunner for CountingRunner {
        async fn execute(&self, _sql: &str) -> dbinit_core::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.refuse {
                Err(BootstrapError::connect(sqlx::Error::PoolTimedOut))
            } else {
                Ok(())
            }
        }
    }

    fn app(runner: Arc<CountingRunner>) -> Router {
        let config = DbConfig::new("db.internal", "root", "secret", Dialect::MySql);
        router().with_state(AppState::new(config, runner))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn post_returns_ok() {
        let runner = Arc::new(CountingRunner::default());
        let response = app(runner.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"anything": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "ok");
        assert_eq!(runner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_without_body_returns_ok() {
        let runner = Arc::new(CountingRunner::default());
        let response = app(runner)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn failure_is_200_with_error_text() {
        let runner = Arc::new(CountingRunner {
            refuse: true,
            ..Default::default()
        });
        let response = app(runner)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.starts_with("Error: "));
    }
}
