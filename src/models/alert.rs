use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    UpcomingBirth,
    PendingDiagnosis,
    VaccinationDue,
    SanitaryFollowup,
    ActiveWithdrawal,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::UpcomingBirth => "Upcoming Birth",
            AlertCategory::PendingDiagnosis => "Pending Diagnosis",
            AlertCategory::VaccinationDue => "Vaccination / Health Due",
            AlertCategory::SanitaryFollowup => "Sanitary Follow-up",
            AlertCategory::ActiveWithdrawal => "Active Withdrawal",
        }
    }

    /// Stable machine tag, identical to the serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            AlertCategory::UpcomingBirth => "upcoming_birth",
            AlertCategory::PendingDiagnosis => "pending_diagnosis",
            AlertCategory::VaccinationDue => "vaccination_due",
            AlertCategory::SanitaryFollowup => "sanitary_followup",
            AlertCategory::ActiveWithdrawal => "active_withdrawal",
        }
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::Low => "ℹ",
            Priority::Medium => "→",
            Priority::High => "!",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub priority: Priority,
    pub animal_id: i64,
    pub animal_label: String,
    pub message: String,
    /// Days remaining (or elapsed, for pending diagnoses). Negative when overdue.
    pub days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Alert {
    pub fn new(
        category: AlertCategory,
        priority: Priority,
        animal_id: i64,
        animal_label: impl Into<String>,
        days: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            animal_id,
            animal_label: animal_label.into(),
            message: message.into(),
            days,
            event_id: None,
            due_date: None,
        }
    }

    pub fn with_event(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::High
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn serialized_tags_match() {
        for category in [
            AlertCategory::UpcomingBirth,
            AlertCategory::PendingDiagnosis,
            AlertCategory::VaccinationDue,
            AlertCategory::SanitaryFollowup,
            AlertCategory::ActiveWithdrawal,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.tag()));
        }
    }

    #[test]
    fn alert_json_shape() {
        let alert = Alert::new(
            AlertCategory::UpcomingBirth,
            Priority::High,
            3,
            "MX-003",
            6,
            "Birth expected in 6 days",
        )
        .with_event(11);

        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["category"], "upcoming_birth");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["days"], 6);
        assert_eq!(value["event_id"], 11);
        assert!(value.get("due_date").is_none());
    }
}
