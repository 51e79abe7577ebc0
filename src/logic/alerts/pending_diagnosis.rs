use super::{AlertPolicy, AlertRule};
use crate::models::{Alert, AlertCategory, HerdSnapshot, Priority};
use chrono::NaiveDate;

/// Pregnancy diagnosis follow-up rule
///
/// Every service without a diagnosis result (or still marked pending) is
/// reported. Once the service is a month old the check is overdue.
pub struct PendingDiagnosisRule;

impl AlertRule for PendingDiagnosisRule {
    fn id(&self) -> &'static str {
        "pending_diagnosis"
    }

    fn name(&self) -> &'static str {
        "Pending Pregnancy Diagnoses"
    }

    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, policy: &AlertPolicy) -> Vec<Alert> {
        herd.reproductive_events
            .iter()
            .filter(|e| e.awaiting_diagnosis() && !e.has_given_birth())
            .filter(|e| e.service_date <= as_of)
            .filter(|e| herd.is_tracked(e.female_id))
            .map(|e| {
                let days = (as_of - e.service_date).num_days();
                let priority = if days >= policy.diagnosis_overdue_days {
                    Priority::High
                } else {
                    Priority::Medium
                };
                let label = herd.label_for(e.female_id);
                let message = format!(
                    "{} served {} day(s) ago ({}) has no pregnancy diagnosis",
                    label,
                    days,
                    e.service_date.format("%b %d")
                );

                Alert::new(
                    AlertCategory::PendingDiagnosis,
                    priority,
                    e.female_id,
                    label,
                    days,
                    message,
                )
                .with_event(e.id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Animal, AnimalStatus, Diagnosis, ReproductiveEvent, Sex};
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn priority_by_days_since_service() {
        let as_of = date(2024, 6, 1);
        let herd = HerdSnapshot {
            reproductive_events: vec![
                ReproductiveEvent::new(1, 10, as_of - Duration::days(29)),
                ReproductiveEvent::new(2, 11, as_of - Duration::days(30)),
                ReproductiveEvent::new(3, 12, as_of - Duration::days(40))
                    .with_diagnosis(Diagnosis::Pending, as_of - Duration::days(5)),
                ReproductiveEvent::new(4, 13, as_of - Duration::days(40))
                    .with_diagnosis(Diagnosis::Positive, as_of - Duration::days(5)),
            ],
            ..Default::default()
        };

        let alerts = PendingDiagnosisRule.evaluate(&herd, as_of, &AlertPolicy::default());
        let summary: Vec<(i64, Priority)> = alerts.iter().map(|a| (a.animal_id, a.priority)).collect();
        assert_eq!(
            summary,
            vec![(10, Priority::Medium), (11, Priority::High), (12, Priority::High)]
        );
    }

    #[test]
    fn inactive_female_is_skipped() {
        let as_of = date(2024, 6, 1);
        let herd = HerdSnapshot {
            animals: vec![Animal::new(10, Sex::Female).with_status(AnimalStatus::Deceased)],
            reproductive_events: vec![ReproductiveEvent::new(1, 10, as_of - Duration::days(10))],
            ..Default::default()
        };
        assert!(PendingDiagnosisRule
            .evaluate(&herd, as_of, &AlertPolicy::default())
            .is_empty());
    }
}
