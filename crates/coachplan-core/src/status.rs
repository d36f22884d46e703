//! Plan status of a customer, derived from the end date of their latest plan.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plans ending within this many days are flagged as expiring soon.
pub const WARNING_WINDOW_DAYS: i64 = 3;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Urgency classification of a customer's current plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// More than [`WARNING_WINDOW_DAYS`] days left.
    Good,
    /// Ends within [`WARNING_WINDOW_DAYS`] days.
    Warning,
    /// End date reached or passed.
    Expired,
    /// The customer never had a plan.
    NoPlan,
}

impl PlanStatus {
    /// Sort key, most urgent first.
    pub fn urgency(self) -> u8 {
        match self {
            Self::Expired => 0,
            Self::Warning => 1,
            Self::NoPlan => 2,
            Self::Good => 3,
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Expired => "expired",
            Self::NoPlan => "no_plan",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanStatus {
    type Err = PlanStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "expired" => Ok(Self::Expired),
            "no_plan" => Ok(Self::NoPlan),
            other => Err(PlanStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanStatus`] string.
#[derive(Debug, Clone)]
pub struct PlanStatusParseError(pub String);

impl fmt::Display for PlanStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan status: {:?}", self.0)
    }
}

impl std::error::Error for PlanStatusParseError {}

/// Status, remaining days, and display label for one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: PlanStatus,
    /// Whole days until the plan ends (negative once it has ended).
    pub days_remaining: Option<i64>,
    pub label: String,
}

/// Whole days from `now` until `end`, rounded half away from zero.
pub fn days_remaining(now: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).round() as i64
}

/// Classify remaining days; `None` means there is no plan.
pub fn classify(days_remaining: Option<i64>) -> PlanStatus {
    match days_remaining {
        None => PlanStatus::NoPlan,
        Some(days) if days > WARNING_WINDOW_DAYS => PlanStatus::Good,
        Some(days) if days > 0 => PlanStatus::Warning,
        Some(_) => PlanStatus::Expired,
    }
}

/// Human-readable label for a status.
pub fn status_label(status: PlanStatus, days_remaining: Option<i64>) -> String {
    let days = days_remaining.unwrap_or(0);
    match status {
        PlanStatus::Good | PlanStatus::Warning => format!("expires in {days} days"),
        PlanStatus::Expired => format!("expired {} days ago", days.abs()),
        PlanStatus::NoPlan => "no plan".to_owned(),
    }
}

/// Derive the full status report for a customer.
pub fn derive_status(last_plan_end_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> StatusReport {
    let days = last_plan_end_date.map(|end| days_remaining(now, end));
    let status = classify(days);
    StatusReport {
        status,
        days_remaining: days,
        label: status_label(status, days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let now = at(2024, 1, 10, 0);
        assert_eq!(days_remaining(now, now + Duration::hours(36)), 2);
        assert_eq!(days_remaining(now, now + Duration::hours(35)), 1);
        assert_eq!(days_remaining(now, now - Duration::hours(36)), -2);
        assert_eq!(days_remaining(now, now - Duration::hours(11)), 0);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(None), PlanStatus::NoPlan);
        assert_eq!(classify(Some(4)), PlanStatus::Good);
        assert_eq!(classify(Some(3)), PlanStatus::Warning);
        assert_eq!(classify(Some(1)), PlanStatus::Warning);
        assert_eq!(classify(Some(0)), PlanStatus::Expired);
        assert_eq!(classify(Some(-7)), PlanStatus::Expired);
    }

    #[test]
    fn labels() {
        assert_eq!(status_label(PlanStatus::Good, Some(10)), "expires in 10 days");
        assert_eq!(status_label(PlanStatus::Warning, Some(2)), "expires in 2 days");
        assert_eq!(status_label(PlanStatus::Expired, Some(-5)), "expired 5 days ago");
        assert_eq!(status_label(PlanStatus::Expired, Some(0)), "expired 0 days ago");
        assert_eq!(status_label(PlanStatus::NoPlan, None), "no plan");
    }

    #[test]
    fn display_from_str_roundtrip() {
        for status in [
            PlanStatus::Good,
            PlanStatus::Warning,
            PlanStatus::Expired,
            PlanStatus::NoPlan,
        ] {
            let parsed: PlanStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("urgent".parse::<PlanStatus>().is_err());
    }

    #[test]
    fn urgency_orders_expired_first() {
        let mut statuses = vec![
            PlanStatus::Good,
            PlanStatus::NoPlan,
            PlanStatus::Expired,
            PlanStatus::Warning,
        ];
        statuses.sort_by_key(|s| s.urgency());
        assert_eq!(
            statuses,
            vec![
                PlanStatus::Expired,
                PlanStatus::Warning,
                PlanStatus::NoPlan,
                PlanStatus::Good,
            ]
        );
    }
}
