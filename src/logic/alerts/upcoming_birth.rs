use super::{AlertPolicy, AlertRule};
use crate::logic::breeding::estimated_parturition;
use crate::models::{Alert, AlertCategory, Diagnosis, HerdSnapshot, Priority, ReproductiveEvent};
use chrono::NaiveDate;

/// Upcoming kidding rule
///
/// Reports pregnancies whose expected parturition falls inside the birth
/// window and where no kidding has been recorded yet.
///
/// Expected date:
/// - the recorded estimate when present
/// - otherwise service date + gestation, but only for confirmed pregnancies
///
/// Services diagnosed negative never produce a birth alert.
pub struct UpcomingBirthRule;

impl AlertRule for UpcomingBirthRule {
    fn id(&self) -> &'static str {
        "upcoming_birth"
    }

    fn name(&self) -> &'static str {
        "Upcoming Births"
    }

    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, policy: &AlertPolicy) -> Vec<Alert> {
        herd.reproductive_events
            .iter()
            .filter(|e| !e.has_given_birth() && e.diagnosis != Some(Diagnosis::Negative))
            .filter(|e| herd.is_tracked(e.female_id))
            .filter_map(|e| {
                let due = expected_date(e)?;
                let days = (due - as_of).num_days();
                if !(0..=policy.birth_window_days).contains(&days) {
                    return None;
                }
                Some(self.build_alert(herd, e, due, days, policy))
            })
            .collect()
    }
}

fn expected_date(event: &ReproductiveEvent) -> Option<NaiveDate> {
    event.estimated_parturition.or_else(|| {
        event
            .is_confirmed_pregnant()
            .then(|| estimated_parturition(event.service_date))
    })
}

impl UpcomingBirthRule {
    fn build_alert(
        &self,
        herd: &HerdSnapshot,
        event: &ReproductiveEvent,
        due: NaiveDate,
        days: i64,
        policy: &AlertPolicy,
    ) -> Alert {
        let priority = if days <= policy.birth_high_days {
            Priority::High
        } else {
            Priority::Medium
        };

        let label = herd.label_for(event.female_id);
        let message = match days {
            0 => format!("{} is expected to kid today", label),
            1 => format!("{} is expected to kid tomorrow", label),
            d => format!("{} is expected to kid in {} days ({})", label, d, due.format("%b %d")),
        };

        Alert::new(
            AlertCategory::UpcomingBirth,
            priority,
            event.female_id,
            label,
            days,
            message,
        )
        .with_event(event.id)
        .with_due_date(due)
    }
}
