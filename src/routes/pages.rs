//! Dashboard pages
//!
//! Serves the exported dashboard bundle. Every page request passes through the
//! route guard first, so anonymous visitors never see a protected page shell
//! and logged-in visitors skip the login form.

use axum::{Router, middleware};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::auth::guard::{RouteGuardConfig, route_guard};

pub fn create_page_routes(static_dir: &Path, guard: Arc<RouteGuardConfig>) -> Router {
    let pages = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .precompressed_gzip();

    Router::new()
        .fallback_service(pages)
        .layer(middleware::from_fn_with_state(guard, route_guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    fn app() -> Router {
        create_page_routes(Path::new("./does-not-exist"), Arc::new(RouteGuardConfig::default()))
    }

    #[tokio::test]
    async fn anonymous_dashboard_visit_is_redirected_before_file_lookup() {
        let req = Request::builder().uri("/dashboard/ongs").body(Body::empty()).unwrap();

        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn public_page_reaches_static_files() {
        let req = Request::builder().uri("/about").body(Body::empty()).unwrap();

        let response = app().oneshot(req).await.unwrap();

        // Passed the guard; the empty bundle has no such file
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let ongs = dir.path().join("dashboard").join("ongs");
        std::fs::create_dir_all(&ongs).unwrap();
        std::fs::write(ongs.join("index.html"), "ngo list").unwrap();
        dir
    }

    async fn get(dir: &Path, uri: &str, cookie: Option<&str>) -> axum::response::Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = cookie {
            builder = builder.header(header::COOKIE, format!("auth_token={}", value));
        }
        create_page_routes(dir, Arc::new(RouteGuardConfig::default()))
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn alternate_spellings_of_protected_page_are_redirected() {
        let dir = bundle();

        for uri in [
            "/dashboard/ongs/",
            "//dashboard/ongs/",
            "/%64ashboard/ongs/",
            "/./dashboard/ongs/",
        ] {
            let response = get(dir.path(), uri, None).await;

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "uri {}", uri);
            assert_eq!(response.headers()[header::LOCATION], "/login");
        }
    }

    #[tokio::test]
    async fn protected_page_is_served_with_cookie() {
        let dir = bundle();

        let response = get(dir.path(), "/dashboard/ongs/", Some("token")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ngo list");
    }
}
