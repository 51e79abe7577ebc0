pub mod active_withdrawal;
pub mod engine;
pub mod pending_diagnosis;
pub mod sanitary_followup;
pub mod upcoming_birth;
pub mod vaccination;

pub use engine::{collect_alerts, count_by_priority, urgent_only, AlertEngine};

use crate::models::{Alert, HealthEvent, HealthEventKind, HerdSnapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trait for herd alert rules
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against the whole herd
    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, policy: &AlertPolicy) -> Vec<Alert>;
}

/// Windows and thresholds used by the alert rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Births expected within this many days are reported.
    pub birth_window_days: i64,
    /// Births this close are high priority.
    pub birth_high_days: i64,
    /// Services left undiagnosed this long are high priority.
    pub diagnosis_overdue_days: i64,
    /// Vaccinations due within this many days are reported.
    pub vaccination_window_days: i64,
    pub followup_window_days: i64,
    pub followup_high_days: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            birth_window_days: 15,
            birth_high_days: 7,
            diagnosis_overdue_days: 30,
            vaccination_window_days: 30,
            followup_window_days: 15,
            followup_high_days: 7,
        }
    }
}

/// Latest event per animal and treatment line, so a booster that has been
/// given supersedes the earlier dose's due date.
pub(crate) fn latest_health_events(herd: &HerdSnapshot) -> Vec<&HealthEvent> {
    let mut latest: HashMap<(i64, HealthEventKind, String), &HealthEvent> = HashMap::new();

    for event in &herd.health_events {
        let line = event
            .description
            .as_deref()
            .map(|d| d.trim().to_lowercase())
            .unwrap_or_default();
        latest
            .entry((event.animal_id, event.kind, line))
            .and_modify(|current| {
                if (event.date, event.id) > (current.date, current.id) {
                    *current = event;
                }
            })
            .or_insert(event);
    }

    let mut events: Vec<&HealthEvent> = latest.into_values().collect();
    events.sort_by_key(|e| (e.animal_id, e.id));
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn later_dose_supersedes_earlier() {
        let herd = HerdSnapshot {
            health_events: vec![
                HealthEvent::new(1, 5, HealthEventKind::Vaccination, date(2023, 5, 1))
                    .with_description("Clostridial")
                    .with_next_due(date(2024, 5, 1)),
                HealthEvent::new(2, 5, HealthEventKind::Vaccination, date(2024, 5, 3))
                    .with_description("clostridial ")
                    .with_next_due(date(2025, 5, 3)),
                HealthEvent::new(3, 5, HealthEventKind::Vaccination, date(2023, 6, 1))
                    .with_description("Rabies")
                    .with_next_due(date(2024, 6, 1)),
                HealthEvent::new(4, 5, HealthEventKind::Deworming, date(2024, 1, 1)),
            ],
            ..Default::default()
        };

        let latest = latest_health_events(&herd);
        let ids: Vec<i64> = latest.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn policy_defaults_fill_missing_fields() {
        let policy: AlertPolicy = serde_yaml::from_str("birth_window_days: 20").unwrap();
        assert_eq!(policy.birth_window_days, 20);
        assert_eq!(policy.birth_high_days, 7);
        assert_eq!(policy.diagnosis_overdue_days, 30);
    }
}
