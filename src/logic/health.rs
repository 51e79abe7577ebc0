use crate::models::HealthEvent;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day from which products are usable again. Equal to the event date when
/// there is no withdrawal period.
pub fn withdrawal_end_date(event_date: NaiveDate, withdrawal_days: Option<u32>) -> NaiveDate {
    event_date + Duration::days(i64::from(withdrawal_days.unwrap_or(0)))
}

pub fn is_in_withdrawal(event: &HealthEvent, as_of: NaiveDate) -> bool {
    withdrawal_days_remaining(event, as_of) > 0
}

pub fn withdrawal_days_remaining(event: &HealthEvent, as_of: NaiveDate) -> i64 {
    match event.withdrawal_days {
        None | Some(0) => 0,
        Some(days) => {
            let end = withdrawal_end_date(event.date, Some(days));
            // Events dated in the future have not started their withdrawal yet.
            if as_of < event.date {
                return 0;
            }
            (end - as_of).num_days().max(0)
        }
    }
}

/// Where a scheduled follow-up (next dose, re-check) stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Overdue,
    Urgent,
    Upcoming,
    Scheduled,
    NotScheduled,
}

impl DueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueState::Overdue => "Overdue",
            DueState::Urgent => "Urgent",
            DueState::Upcoming => "Upcoming",
            DueState::Scheduled => "Scheduled",
            DueState::NotScheduled => "Not Scheduled",
        }
    }
}

impl std::fmt::Display for DueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const URGENT_WITHIN_DAYS: i64 = 3;
pub const UPCOMING_WITHIN_DAYS: i64 = 15;

pub fn days_until(date: NaiveDate, as_of: NaiveDate) -> i64 {
    (date - as_of).num_days()
}

pub fn due_state(next_due: Option<NaiveDate>, as_of: NaiveDate) -> DueState {
    let Some(next_due) = next_due else {
        return DueState::NotScheduled;
    };

    match days_until(next_due, as_of) {
        d if d < 0 => DueState::Overdue,
        d if d <= URGENT_WITHIN_DAYS => DueState::Urgent,
        d if d <= UPCOMING_WITHIN_DAYS => DueState::Upcoming,
        _ => DueState::Scheduled,
    }
}
