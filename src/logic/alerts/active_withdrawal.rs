use super::{AlertPolicy, AlertRule};
use crate::logic::health::{is_in_withdrawal, withdrawal_days_remaining, withdrawal_end_date};
use crate::models::{Alert, AlertCategory, HerdSnapshot, Priority};
use chrono::NaiveDate;

/// Active withdrawal rule - milk and meat from these animals must not reach the food chain
pub struct ActiveWithdrawalRule;

impl AlertRule for ActiveWithdrawalRule {
    fn id(&self) -> &'static str {
        "active_withdrawal"
    }

    fn name(&self) -> &'static str {
        "Active Withdrawal Periods"
    }

    fn evaluate(&self, herd: &HerdSnapshot, as_of: NaiveDate, _policy: &AlertPolicy) -> Vec<Alert> {
        herd.health_events
            .iter()
            .filter(|e| herd.is_tracked(e.animal_id))
            .filter(|e| is_in_withdrawal(e, as_of))
            .map(|e| {
                let days = withdrawal_days_remaining(e, as_of);
                let end = withdrawal_end_date(e.date, e.withdrawal_days);
                let label = herd.label_for(e.animal_id);
                let product = e
                    .description
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default();
                let message = format!(
                    "{} in withdrawal after {}{}: {} day(s) left, products usable from {}",
                    label,
                    e.kind.as_str().to_lowercase(),
                    product,
                    days,
                    end.format("%b %d")
                );

                Alert::new(
                    AlertCategory::ActiveWithdrawal,
                    Priority::High,
                    e.animal_id,
                    label,
                    days,
                    message,
                )
                .with_event(e.id)
                .with_due_date(end)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthEvent, HealthEventKind};
    use chrono::Duration;

    #[test]
    fn withdrawal_alert_is_always_high() {
        let treated = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let herd = HerdSnapshot {
            health_events: vec![
                HealthEvent::new(1, 3, HealthEventKind::Treatment, treated)
                    .with_description("Oxytetracycline")
                    .with_withdrawal(10),
                HealthEvent::new(2, 4, HealthEventKind::Deworming, treated).with_withdrawal(3),
            ],
            ..Default::default()
        };

        let as_of = treated + Duration::days(9);
        let alerts = ActiveWithdrawalRule.evaluate(&herd, as_of, &AlertPolicy::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].priority, Priority::High);
        assert_eq!(alerts[0].days, 1);
        assert!(alerts[0].message.contains("Oxytetracycline"));

        let as_of = treated + Duration::days(10);
        assert!(ActiveWithdrawalRule
            .evaluate(&herd, as_of, &AlertPolicy::default())
            .is_empty());
    }
}
