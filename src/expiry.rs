/// Certification expiry computation
use crate::error::{CertsError, CertsResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Renewal cadence units accepted when creating an expiring certification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl RenewalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalUnit::Days => "days",
            RenewalUnit::Weeks => "weeks",
            RenewalUnit::Months => "months",
            RenewalUnit::Years => "years",
        }
    }

    pub fn from_str(s: &str) -> CertsResult<Self> {
        match s.to_lowercase().as_str() {
            "days" => Ok(RenewalUnit::Days),
            "weeks" => Ok(RenewalUnit::Weeks),
            "months" => Ok(RenewalUnit::Months),
            "years" => Ok(RenewalUnit::Years),
            _ => Err(CertsError::Validation {
                field: "good_for_unit",
                reason: format!("Invalid renewal unit: {}", s),
            }),
        }
    }
}

/// Compute the due date for an expiring certification.
///
/// Flat conversion on purpose: months are 30 days and anything that is not
/// days/weeks/months (years included) is 365 days. Keeps the date math free
/// of calendar-month and leap-year ambiguity; do not replace with calendar
/// arithmetic.
///
/// Total over all inputs: a cadence too large for the calendar saturates at
/// the latest representable date instead of panicking. The catalog bounds
/// renewal quantities well below that, so saturation only applies to rows
/// written outside the service.
pub fn due_date(received: NaiveDate, quantity: i64, unit: &str) -> NaiveDate {
    let days = match unit {
        "days" => quantity,
        "weeks" => quantity.saturating_mul(7),
        "months" => quantity.saturating_mul(30),
        _ => quantity.saturating_mul(365),
    };

    Duration::try_days(days)
        .and_then(|d| received.checked_add_signed(d))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_days() {
        assert_eq!(due_date(date(2024, 1, 1), 10, "days"), date(2024, 1, 11));
        assert_eq!(due_date(date(2024, 2, 28), 2, "days"), date(2024, 3, 1));
    }

    #[test]
    fn test_due_date_weeks() {
        assert_eq!(due_date(date(2024, 1, 1), 2, "weeks"), date(2024, 1, 15));
    }

    #[test]
    fn test_due_date_months_are_flat_thirty_days() {
        // 1 "month" is exactly 30 days, not a calendar month
        assert_eq!(due_date(date(2024, 1, 1), 1, "months"), date(2024, 1, 31));
        assert_eq!(due_date(date(2024, 2, 1), 1, "months"), date(2024, 3, 2));
    }

    #[test]
    fn test_due_date_years_and_unknown_units_fall_back_to_365() {
        assert_eq!(due_date(date(2024, 1, 1), 1, "years"), date(2024, 12, 31));
        assert_eq!(
            due_date(date(2024, 1, 1), 1, "fortnights"),
            date(2024, 12, 31)
        );
        assert_eq!(due_date(date(2024, 1, 1), 1, ""), date(2024, 12, 31));
    }

    #[test]
    fn test_due_date_saturates_instead_of_overflowing() {
        let start = date(2024, 1, 1);

        assert_eq!(
            due_date(start, 1_000_000_000_000, "years"),
            NaiveDate::MAX
        );
        assert_eq!(due_date(start, i64::MAX, "weeks"), NaiveDate::MAX);
        assert_eq!(due_date(start, i64::MAX, "days"), NaiveDate::MAX);
    }

    #[test]
    fn test_renewal_unit_from_str() {
        assert_eq!(RenewalUnit::from_str("days").unwrap(), RenewalUnit::Days);
        assert_eq!(RenewalUnit::from_str("WEEKS").unwrap(), RenewalUnit::Weeks);
        assert_eq!(RenewalUnit::from_str("months").unwrap(), RenewalUnit::Months);
        assert_eq!(RenewalUnit::from_str("years").unwrap(), RenewalUnit::Years);
        assert!(RenewalUnit::from_str("decades").is_err());
    }
}
