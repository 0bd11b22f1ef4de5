/// Authentication extractors
///
/// Handlers receive the resolved employee explicitly through these
/// extractors; there is no ambient current-user state.
use crate::{
    api::middleware::extract_bearer_token,
    context::AppContext,
    db::models::Employee,
    error::CertsError,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Authenticated context - resolves the session token to an employee
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub employee: Employee,
}

#[async_trait]
impl FromRequestParts<AppContext> for AuthContext {
    type Rejection = CertsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| CertsError::Unauthorized("Missing authorization header".to_string()))?;

        let employee = state.employees.resolve_session(&token).await?;

        Ok(AuthContext { employee })
    }
}

/// Admin context - requires the employee's admin flag.
///
/// A missing/invalid session is Unauthorized; a valid session without the
/// admin flag is Forbidden, so callers can tell the two apart.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub employee: Employee,
}

#[async_trait]
impl FromRequestParts<AppContext> for AdminContext {
    type Rejection = CertsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let AuthContext { employee } = AuthContext::from_request_parts(parts, state).await?;

        if !employee.is_admin {
            return Err(CertsError::Forbidden(
                "Administrator access required".to_string(),
            ));
        }

        Ok(AdminContext { employee })
    }
}
