use super::{latest_health_events, AlertPolicy, AlertRule};
use crate::logic::health::days_until;
use crate::models::{Alert, AlertCategory, HerdSnapshot, Priority};
use chrono::NaiveDate;

/// Sanitary follow-up rule
///
/// Covers every health event (vaccination boosters, deworming, treatments,
/// illness re-checks, post-surgery checks) whose next-due date is close or
/// already passed.
pub struct SanitaryFollowupRule;

impl AlertRule for SanitaryFollowupRule {
    fn id(&self) -> &'static str {
        "sanitary_followup"
    }

    fn name(&self) -> &'static str {
        "Sanitary Follow-ups"
    }

    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, policy: &AlertPolicy) -> Vec<Alert> {
        latest_health_events(herd)
            .into_iter()
            .filter(|e| herd.is_tracked(e.animal_id))
            .filter_map(|e| {
                let next_due = e.next_due?;
                let days = days_until(next_due, as_of);
                if days > policy.followup_window_days {
                    return None;
                }

                let priority = if days <= policy.followup_high_days {
                    Priority::High
                } else {
                    Priority::Medium
                };

                let label = herd.label_for(e.animal_id);
                let what = e
                    .description
                    .clone()
                    .unwrap_or_else(|| e.kind.as_str().to_string());
                let message = if days < 0 {
                    format!("{} follow-up for {} is {} day(s) late", what, label, -days)
                } else {
                    format!("{} follow-up for {} in {} day(s)", what, label, days)
                };

                Some(
                    Alert::new(
                        AlertCategory::SanitaryFollowup,
                        priority,
                        e.animal_id,
                        label,
                        days,
                        message,
                    )
                    .with_event(e.id)
                    .with_due_date(next_due),
                )
            })
            .collect()
    }
}
