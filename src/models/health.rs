use crate::error::{HerdOpsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthEventKind {
    #[serde(alias = "vacunacion")]
    Vaccination,
    #[serde(alias = "desparasitacion")]
    Deworming,
    #[serde(alias = "tratamiento")]
    Treatment,
    #[serde(alias = "enfermedad")]
    Illness,
    #[serde(alias = "cirugia")]
    Surgery,
    #[serde(alias = "revision")]
    Checkup,
}

impl HealthEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthEventKind::Vaccination => "Vaccination",
            HealthEventKind::Deworming => "Deworming",
            HealthEventKind::Treatment => "Treatment",
            HealthEventKind::Illness => "Illness",
            HealthEventKind::Surgery => "Surgery",
            HealthEventKind::Checkup => "Checkup",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "vaccination" | "vaccine" | "vacunacion" => Some(HealthEventKind::Vaccination),
            "deworming" | "desparasitacion" => Some(HealthEventKind::Deworming),
            "treatment" | "tratamiento" => Some(HealthEventKind::Treatment),
            "illness" | "disease" | "enfermedad" => Some(HealthEventKind::Illness),
            "surgery" | "cirugia" => Some(HealthEventKind::Surgery),
            "checkup" | "revision" => Some(HealthEventKind::Checkup),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s)
            .ok_or_else(|| HerdOpsError::InvalidData(format!("unknown health event type '{}'", s)))
    }

    pub fn all() -> &'static [HealthEventKind] {
        &[
            HealthEventKind::Vaccination,
            HealthEventKind::Deworming,
            HealthEventKind::Treatment,
            HealthEventKind::Illness,
            HealthEventKind::Surgery,
            HealthEventKind::Checkup,
        ]
    }
}

impl std::fmt::Display for HealthEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    pub id: i64,
    pub animal_id: i64,
    pub kind: HealthEventKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub next_due: Option<NaiveDate>,
    #[serde(default)]
    pub withdrawal_days: Option<u32>,
}

impl HealthEvent {
    pub fn new(id: i64, animal_id: i64, kind: HealthEventKind, date: NaiveDate) -> Self {
        Self {
            id,
            animal_id,
            kind,
            date,
            description: None,
            next_due: None,
            withdrawal_days: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_next_due(mut self, date: NaiveDate) -> Self {
        self.next_due = Some(date);
        self
    }

    pub fn with_withdrawal(mut self, days: u32) -> Self {
        self.withdrawal_days = Some(days);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_str_valid() {
        assert_eq!(
            HealthEventKind::from_str("vacunacion"),
            Some(HealthEventKind::Vaccination)
        );
        assert_eq!(
            HealthEventKind::from_str("De-worming"),
            Some(HealthEventKind::Deworming)
        );
        assert_eq!(
            HealthEventKind::from_str("check up"),
            Some(HealthEventKind::Checkup)
        );
    }

    #[test]
    fn kind_round_trip() {
        for kind in HealthEventKind::all() {
            let debug_str = format!("{:?}", kind);
            assert_eq!(
                HealthEventKind::from_str(&debug_str),
                Some(*kind),
                "Round-trip failed for {:?}",
                kind
            );
        }
    }

    #[test]
    fn kind_parse_rejects_unknown() {
        assert!(HealthEventKind::parse("grooming").is_err());
    }
}
