use super::{
    active_withdrawal::ActiveWithdrawalRule, pending_diagnosis::PendingDiagnosisRule,
    sanitary_followup::SanitaryFollowupRule, upcoming_birth::UpcomingBirthRule,
    vaccination::VaccinationRule, AlertPolicy, AlertRule,
};
use crate::models::{Alert, HerdSnapshot, Priority, PriorityCounts};
use chrono::NaiveDate;

pub struct AlertEngine {
    rules: Vec<Box<dyn AlertRule>>,
    policy: AlertPolicy,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self::with_policy(AlertPolicy::default())
    }

    pub fn with_policy(policy: AlertPolicy) -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(UpcomingBirthRule),
            Box::new(PendingDiagnosisRule),
            Box::new(VaccinationRule),
            Box::new(SanitaryFollowupRule),
            Box::new(ActiveWithdrawalRule),
        ];

        Self { rules, policy }
    }

    /// Runs every rule and returns the alerts ordered by category, animal, event.
    pub fn collect_alerts(&self, herd: &HerdSnapshot, as_of: NaiveDate) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .rules
            .iter()
            .flat_map(|rule| {
                let found = rule.evaluate(herd, as_of, &self.policy);
                tracing::debug!(rule = rule.id(), count = found.len(), "Alert rule evaluated");
                found
            })
            .collect();

        alerts.sort_by(|a, b| {
            a.category
                .tag()
                .cmp(b.category.tag())
                .then(a.animal_id.cmp(&b.animal_id))
                .then(a.event_id.cmp(&b.event_id))
        });
        alerts
    }

    pub fn evaluate_rule(&self, rule_id: &str, herd: &HerdSnapshot, as_of: NaiveDate) -> Vec<Alert> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .map(|rule| rule.evaluate(herd, as_of, &self.policy))
            .unwrap_or_default()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Alerts for the herd using the default windows.
pub fn collect_alerts(herd: &HerdSnapshot, as_of: NaiveDate) -> Vec<Alert> {
    AlertEngine::new().collect_alerts(herd, as_of)
}

pub fn count_by_priority(alerts: &[Alert]) -> PriorityCounts {
    alerts.iter().fold(PriorityCounts::default(), |mut counts, alert| {
        match alert.priority {
            Priority::High => counts.high += 1,
            Priority::Medium => counts.medium += 1,
            Priority::Low => counts.low += 1,
        }
        counts.total += 1;
        counts
    })
}

/// High-priority alerts only, stable-sorted by category tag.
pub fn urgent_only(alerts: &[Alert]) -> Vec<Alert> {
    let mut urgent: Vec<Alert> = alerts.iter().filter(|a| a.is_urgent()).cloned().collect();
    urgent.sort_by(|a, b| a.category.tag().cmp(b.category.tag()));
    urgent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AlertCategory, Animal, AnimalStatus, Diagnosis, HealthEvent, HealthEventKind,
        ReproductiveEvent, Sex,
    };
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn herd() -> HerdSnapshot {
        let today = as_of();
        HerdSnapshot {
            animals: vec![
                Animal::new(1, Sex::Female).with_tag("CB-01"),
                Animal::new(2, Sex::Female).with_tag("CB-02"),
                Animal::new(3, Sex::Female)
                    .with_tag("CB-03")
                    .with_status(AnimalStatus::Sold),
            ],
            reproductive_events: vec![
                ReproductiveEvent::new(10, 1, date(2024, 1, 8))
                    .with_diagnosis(Diagnosis::Positive, date(2024, 2, 20))
                    .with_estimated_parturition(today + Duration::days(6)),
                ReproductiveEvent::new(11, 2, today - Duration::days(35)),
                ReproductiveEvent::new(12, 3, today - Duration::days(35)),
            ],
            health_events: vec![
                HealthEvent::new(20, 2, HealthEventKind::Treatment, today - Duration::days(2))
                    .with_withdrawal(5)
                    .with_next_due(today + Duration::days(10)),
                HealthEvent::new(21, 1, HealthEventKind::Vaccination, date(2023, 6, 1))
                    .with_next_due(today + Duration::days(20)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn single_upcoming_birth_is_high() {
        let alerts = collect_alerts(&herd(), as_of());
        let births: Vec<&Alert> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::UpcomingBirth)
            .collect();
        assert_eq!(births.len(), 1);
        assert_eq!(births[0].priority, Priority::High);
        assert_eq!(births[0].animal_label, "CB-01");
    }

    #[test]
    fn all_categories_collected_and_sold_animals_skipped() {
        let alerts = collect_alerts(&herd(), as_of());
        let tags: Vec<&str> = alerts.iter().map(|a| a.category.tag()).collect();
        assert_eq!(
            tags,
            vec![
                "active_withdrawal",
                "pending_diagnosis",
                "sanitary_followup",
                "upcoming_birth",
                "vaccination_due",
                "vaccination_due",
            ]
        );
        assert!(alerts.iter().all(|a| a.animal_id != 3));
    }

    #[test]
    fn collect_is_idempotent() {
        let herd = herd();
        let first = collect_alerts(&herd, as_of());
        let second = collect_alerts(&herd, as_of());
        assert_eq!(first, second);
    }

    #[test]
    fn counts_and_urgent_filter() {
        let alerts = collect_alerts(&herd(), as_of());
        let counts = count_by_priority(&alerts);
        // withdrawal, pending (35 days), birth are high; the treatment's
        // follow-up and due date are medium; the vaccination 20 days out is low
        assert_eq!(counts.high, 3);
        assert_eq!(counts.medium, 2);
        assert_eq!(counts.low, 1);
        assert_eq!(counts.total, 6);

        let urgent = urgent_only(&alerts);
        assert_eq!(urgent.len(), 3);
        assert!(urgent.iter().all(|a| a.priority == Priority::High));
        let tags: Vec<&str> = urgent.iter().map(|a| a.category.tag()).collect();
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn urgent_only_is_stable_within_category() {
        let make = |animal_id: i64, category: AlertCategory| {
            Alert::new(category, Priority::High, animal_id, format!("#{}", animal_id), 1, "x")
        };
        let alerts = vec![
            make(9, AlertCategory::VaccinationDue),
            make(5, AlertCategory::ActiveWithdrawal),
            make(7, AlertCategory::VaccinationDue),
            make(1, AlertCategory::ActiveWithdrawal),
        ];
        let ids: Vec<i64> = urgent_only(&alerts).iter().map(|a| a.animal_id).collect();
        assert_eq!(ids, vec![5, 1, 9, 7]);
    }

    #[test]
    fn custom_policy_widens_birth_window() {
        let today = as_of();
        let herd = HerdSnapshot {
            reproductive_events: vec![ReproductiveEvent::new(1, 1, date(2024, 1, 1))
                .with_estimated_parturition(today + Duration::days(20))],
            ..Default::default()
        };
        assert!(AlertEngine::new()
            .evaluate_rule("upcoming_birth", &herd, today)
            .is_empty());

        let engine = AlertEngine::with_policy(AlertPolicy {
            birth_window_days: 30,
            ..AlertPolicy::default()
        });
        assert_eq!(engine.evaluate_rule("upcoming_birth", &herd, today).len(), 1);
    }

    #[test]
    fn rules_are_listed() {
        let ids: Vec<&str> = AlertEngine::new().list_rules().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains(&"active_withdrawal"));
    }
}
