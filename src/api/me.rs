/// Self-service endpoints for the logged-in employee
use crate::{
    auth::AuthContext,
    context::AppContext,
    db::models::TrainingSession,
    directory::HeldCertification,
    error::CertsResult,
};
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Build self-service routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/me/certifications", get(my_certifications))
        .route("/api/me/hours", get(my_hours))
        .route("/api/trainings", get(upcoming_trainings))
}

/// Completed-vs-required hours for the hours view
#[derive(Debug, Serialize, Deserialize)]
pub struct HoursSummary {
    pub completed: i64,
    pub required: i64,
}

/// Certifications held by the logged-in employee
async fn my_certifications(
    State(ctx): State<AppContext>,
    auth: AuthContext,
) -> CertsResult<Json<Vec<HeldCertification>>> {
    let held = ctx.directory.certifications_for(auth.employee.id).await?;

    Ok(Json(held))
}

/// Hours counters for the logged-in employee
async fn my_hours(auth: AuthContext) -> Json<HoursSummary> {
    Json(HoursSummary {
        completed: auth.employee.completed,
        required: auth.employee.required,
    })
}

/// Offered training sessions, visible to any logged-in employee
async fn upcoming_trainings(
    State(ctx): State<AppContext>,
    _auth: AuthContext,
) -> CertsResult<Json<Vec<TrainingSession>>> {
    let trainings = ctx.directory.list_trainings().await?;

    Ok(Json(trainings))
}
