/// Signup, login, and logout endpoints
use crate::{
    api::middleware::extract_bearer_token,
    auth::AuthContext,
    context::AppContext,
    db::models::Employee,
    employee::{LoginRequest, NewEmployee, SessionResponse},
    error::{CertsError, CertsResult},
};
use axum::{
    extract::State,
    http::HeaderMap,
    routing::{delete, get, post},
    Json, Router,
};

/// Build session routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/session", post(login))
        .route("/api/session", get(current_session))
        .route("/api/session", delete(logout))
}

/// Open registration; a fresh session is issued right away
async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<NewEmployee>,
) -> CertsResult<Json<SessionResponse>> {
    let employee = ctx.employees.register(req).await?;
    let session = ctx.employees.create_session(employee.id).await?;

    Ok(Json(SessionResponse {
        token: session.token,
        employee,
    }))
}

/// Login endpoint.
///
/// The failure message never says whether the username or the password was
/// wrong.
async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> CertsResult<Json<SessionResponse>> {
    let employee = ctx
        .employees
        .authenticate(&req.username, &req.password)
        .await?
        .ok_or_else(|| CertsError::Unauthorized("Invalid username or password".to_string()))?;

    tracing::info!("Employee {} logged in", employee.id);

    let session = ctx.employees.create_session(employee.id).await?;

    Ok(Json(SessionResponse {
        token: session.token,
        employee,
    }))
}

/// Resolve the current session to its employee
async fn current_session(auth: AuthContext) -> Json<Employee> {
    Json(auth.employee)
}

/// Logout: invalidate the presented session token. Idempotent.
async fn logout(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> CertsResult<Json<serde_json::Value>> {
    if let Some(token) = extract_bearer_token(&headers) {
        ctx.employees.delete_session(&token).await?;
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}
