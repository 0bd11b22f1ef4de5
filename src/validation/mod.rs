/// Field validation
///
/// Length and format limits mirror the persisted schema. Each check returns
/// a per-field `Validation` error so the presentation layer can annotate the
/// offending form field.
use crate::error::{CertsError, CertsResult};

fn require(field: &'static str, value: &str) -> CertsResult<()> {
    if value.trim().is_empty() {
        return Err(CertsError::Validation {
            field,
            reason: format!("{} cannot be empty", field),
        });
    }
    Ok(())
}

fn max_len(field: &'static str, value: &str, max: usize) -> CertsResult<()> {
    if value.chars().count() > max {
        return Err(CertsError::Validation {
            field,
            reason: format!("{} must be at most {} characters", field, max),
        });
    }
    Ok(())
}

/// Username: non-empty, at most 25 characters
pub fn validate_username(username: &str) -> CertsResult<()> {
    require("username", username)?;
    max_len("username", username, 25)
}

/// Email: basic format check, at most 50 characters, unique at the store
pub fn validate_email(email: &str) -> CertsResult<()> {
    require("email", email)?;
    max_len("email", email, 50)?;

    let Some((local, domain)) = email.split_once('@') else {
        return Err(CertsError::Validation {
            field: "email",
            reason: "Invalid email format".to_string(),
        });
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(CertsError::Validation {
            field: "email",
            reason: "Invalid email format".to_string(),
        });
    }

    Ok(())
}

pub fn validate_first_name(name: &str) -> CertsResult<()> {
    require("first_name", name)?;
    max_len("first_name", name, 25)
}

pub fn validate_last_name(name: &str) -> CertsResult<()> {
    require("last_name", name)?;
    max_len("last_name", name, 30)
}

/// State: exactly two letters
pub fn validate_state(state: &str) -> CertsResult<()> {
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CertsError::Validation {
            field: "state",
            reason: "State must be a 2-letter code".to_string(),
        });
    }
    Ok(())
}

pub fn validate_site_name(site_name: &str) -> CertsResult<()> {
    require("site_name", site_name)?;
    max_len("site_name", site_name, 30)
}

pub fn validate_city(city: &str) -> CertsResult<()> {
    max_len("city", city, 25)
}

pub fn validate_room(room: &str) -> CertsResult<()> {
    require("room", room)?;
    max_len("room", room, 30)
}

pub fn validate_password(password: &str) -> CertsResult<()> {
    if password.len() < 6 {
        return Err(CertsError::Validation {
            field: "password",
            reason: "Password must be at least 6 characters".to_string(),
        });
    }
    Ok(())
}
