/// Administrative endpoints
///
/// Every route here requires a session whose employee carries the admin
/// flag; the extractor rejects the rest.
use crate::{
    assignment::{AssignCertification, AssignLocation},
    auth::AdminContext,
    catalog::{CertificationInput, LocationInput, TrainingInput},
    context::AppContext,
    db::models::{Certification, Employee, EmployeeCertification, Location, TrainingSession},
    directory::HeldCertification,
    employee::{HoursUpdate, NewEmployee, PasswordReset, UpdateProfile},
    error::CertsResult,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

/// Build admin routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        // Directory listings
        .route("/api/admin/employees", get(list_employees))
        .route("/api/admin/locations", get(list_locations))
        .route("/api/admin/certifications", get(list_certifications))
        .route("/api/admin/trainings", get(list_trainings))
        // Employees
        .route("/api/admin/employees", post(add_employee))
        .route("/api/admin/employees/:id", put(edit_employee))
        .route("/api/admin/employees/:id/hours", put(set_hours))
        .route("/api/admin/employees/:id/password", put(reset_password))
        .route("/api/admin/employees/:id/certifications", get(employee_certifications))
        .route("/api/admin/employees/:id/certifications", post(assign_certification))
        .route(
            "/api/admin/employees/:id/certifications/:record_id",
            delete(remove_certification),
        )
        .route("/api/admin/employees/:id/locations", get(employee_locations))
        .route("/api/admin/employees/:id/locations", post(assign_location))
        .route(
            "/api/admin/employees/:id/locations/:location_id",
            delete(remove_location),
        )
        // Certifications
        .route("/api/admin/certifications", post(add_certification))
        .route("/api/admin/certifications/:id", put(edit_certification))
        .route("/api/admin/certifications/:id", delete(remove_catalog_certification))
        // Locations
        .route("/api/admin/locations", post(add_location))
        .route("/api/admin/locations/:id", put(edit_location))
        .route("/api/admin/locations/:id", delete(remove_catalog_location))
        // Trainings
        .route("/api/admin/trainings", post(add_training))
        .route("/api/admin/trainings/:id", put(edit_training))
        .route("/api/admin/trainings/:id", delete(remove_training))
}

async fn list_employees(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
) -> CertsResult<Json<Vec<Employee>>> {
    Ok(Json(ctx.directory.list_employees().await?))
}

async fn list_locations(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
) -> CertsResult<Json<Vec<Location>>> {
    Ok(Json(ctx.directory.list_locations().await?))
}

async fn list_certifications(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
) -> CertsResult<Json<Vec<Certification>>> {
    Ok(Json(ctx.directory.list_certifications().await?))
}

async fn list_trainings(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
) -> CertsResult<Json<Vec<TrainingSession>>> {
    Ok(Json(ctx.directory.list_trainings().await?))
}

/// Create an employee on their behalf (no session issued)
async fn add_employee(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Json(req): Json<NewEmployee>,
) -> CertsResult<Json<Employee>> {
    Ok(Json(ctx.employees.register(req).await?))
}

async fn edit_employee(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProfile>,
) -> CertsResult<Json<Employee>> {
    Ok(Json(ctx.employees.update_profile(id, req).await?))
}

async fn set_hours(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<HoursUpdate>,
) -> CertsResult<Json<Employee>> {
    Ok(Json(
        ctx.employees
            .update_hours(id, req.completed, req.required)
            .await?,
    ))
}

async fn reset_password(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<PasswordReset>,
) -> CertsResult<Json<Employee>> {
    Ok(Json(ctx.employees.reset_password(id, &req.password).await?))
}

async fn employee_certifications(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> CertsResult<Json<Vec<HeldCertification>>> {
    Ok(Json(ctx.directory.certifications_for(id).await?))
}

async fn assign_certification(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<AssignCertification>,
) -> CertsResult<Json<EmployeeCertification>> {
    Ok(Json(
        ctx.assignments
            .assign_certification(id, req.cert_id, req.received)
            .await?,
    ))
}

async fn remove_certification(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path((_id, record_id)): Path<(i64, i64)>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.assignments.remove_certification(record_id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn employee_locations(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> CertsResult<Json<Vec<Location>>> {
    Ok(Json(ctx.directory.locations_for(id).await?))
}

async fn assign_location(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<AssignLocation>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.assignments.assign_location(id, req.location_id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn remove_location(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path((id, location_id)): Path<(i64, i64)>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.assignments.remove_location(id, location_id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn add_certification(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Json(req): Json<CertificationInput>,
) -> CertsResult<Json<Certification>> {
    Ok(Json(ctx.catalog.create_certification(req).await?))
}

async fn edit_certification(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<CertificationInput>,
) -> CertsResult<Json<Certification>> {
    Ok(Json(ctx.catalog.update_certification(id, req).await?))
}

async fn remove_catalog_certification(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.catalog.delete_certification(id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn add_location(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Json(req): Json<LocationInput>,
) -> CertsResult<Json<Location>> {
    Ok(Json(ctx.catalog.create_location(req).await?))
}

async fn edit_location(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<LocationInput>,
) -> CertsResult<Json<Location>> {
    Ok(Json(ctx.catalog.update_location(id, req).await?))
}

async fn remove_catalog_location(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.catalog.delete_location(id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn add_training(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Json(req): Json<TrainingInput>,
) -> CertsResult<Json<TrainingSession>> {
    Ok(Json(ctx.catalog.create_training(req).await?))
}

async fn edit_training(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
    Json(req): Json<TrainingInput>,
) -> CertsResult<Json<TrainingSession>> {
    Ok(Json(ctx.catalog.update_training(id, req).await?))
}

async fn remove_training(
    State(ctx): State<AppContext>,
    _admin: AdminContext,
    Path(id): Path<i64>,
) -> CertsResult<Json<serde_json::Value>> {
    ctx.catalog.delete_training(id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
