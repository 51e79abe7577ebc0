use super::{latest_health_events, AlertPolicy, AlertRule};
use crate::logic::health::{days_until, due_state, DueState};
use crate::models::{Alert, AlertCategory, HerdSnapshot, Priority};
use chrono::NaiveDate;

/// Vaccination and health due-date rule
///
/// Looks at the most recent event of each vaccine or treatment line per animal
/// (any health event kind) and reports its next-due date when it falls inside
/// the vaccination window or is already late.
///
/// Priority follows the due state:
/// - Overdue / Urgent: High
/// - Upcoming: Medium
/// - anything else inside the window: Low
pub struct VaccinationRule;

impl AlertRule for VaccinationRule {
    fn id(&self) -> &'static str {
        "vaccination_due"
    }

    fn name(&self) -> &'static str {
        "Vaccination / Health Due Dates"
    }

    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, policy: &AlertPolicy) -> Vec<Alert> {
        latest_health_events(herd)
            .into_iter()
            .filter(|e| herd.is_tracked(e.animal_id))
            .filter_map(|e| {
                let next_due = e.next_due?;
                let days = days_until(next_due, as_of);
                if days > policy.vaccination_window_days {
                    return None;
                }

                let state = due_state(Some(next_due), as_of);
                let priority = match state {
                    DueState::Overdue | DueState::Urgent => Priority::High,
                    DueState::Upcoming => Priority::Medium,
                    _ => Priority::Low,
                };

                let label = herd.label_for(e.animal_id);
                let what = e.description.as_deref().unwrap_or(e.kind.as_str());
                let message = if days < 0 {
                    format!("{} for {} is {} day(s) overdue", what, label, -days)
                } else {
                    format!(
                        "{} for {} due in {} day(s) ({})",
                        what,
                        label,
                        days,
                        next_due.format("%b %d")
                    )
                };

                Some(
                    Alert::new(
                        AlertCategory::VaccinationDue,
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
