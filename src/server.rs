/// HTTP server setup and routing
use crate::{context::AppContext, error::CertsResult};
use axum::{
    http::{header, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Build the main application router
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(not_found)
}

/// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 404 handler
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "NotFound",
            "message": "Endpoint not found"
        })),
    )
}

/// Start the HTTP server
pub async fn serve(ctx: AppContext) -> CertsResult<()> {
    let addr = format!("{}:{}", ctx.config.service.hostname, ctx.config.service.port);

    info!("MyCerts listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(ctx)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{AuthConfig, LoggingConfig, ServerConfig, ServiceConfig, StorageConfig},
        db,
        employee::NewEmployee,
    };
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 0,
            },
            storage: StorageConfig {
                data_directory: "./data".into(),
                database: ":memory:".into(),
            },
            auth: AuthConfig {
                session_ttl_hours: 12,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }

    async fn test_context() -> AppContext {
        AppContext::from_pool(test_config(), db::test_pool().await)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = build_router(test_context().await);

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthenticated_admin_call_is_401_and_mutates_nothing() {
        let ctx = test_context().await;
        let router = build_router(ctx.clone());

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/admin/locations",
                None,
                r#"{"site_name":"North Plant","city":null,"state":"TX"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(ctx.directory.list_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_admin_session_is_403_on_admin_routes() {
        let ctx = test_context().await;
        let router = build_router(ctx.clone());

        let employee = ctx
            .employees
            .register(NewEmployee {
                username: "jdoe".to_string(),
                password: "s3cretpw".to_string(),
                email: "jdoe@example.com".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                is_admin: false,
            })
            .await
            .unwrap();
        let session = ctx.employees.create_session(employee.id).await.unwrap();

        let response = router
            .oneshot(json_request(
                "GET",
                "/api/admin/employees",
                Some(&session.token),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_session_passes_the_gate() {
        let ctx = test_context().await;
        let router = build_router(ctx.clone());

        let admin = ctx
            .employees
            .register(NewEmployee {
                username: "boss".to_string(),
                password: "s3cretpw".to_string(),
                email: "boss@example.com".to_string(),
                first_name: "Big".to_string(),
                last_name: "Boss".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                is_admin: true,
            })
            .await
            .unwrap();
        let session = ctx.employees.create_session(admin.id).await.unwrap();

        let response = router
            .oneshot(json_request(
                "GET",
                "/api/admin/employees",
                Some(&session.token),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_failure_message_is_generic() {
        let ctx = test_context().await;
        let router = build_router(ctx.clone());

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/session",
                None,
                r#"{"username":"nobody","password":"whatever"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("Invalid username or password"));
        assert!(!message.contains("nobody"));
    }
}
