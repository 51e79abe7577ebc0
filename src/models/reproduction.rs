use crate::error::{HerdOpsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "positivo")]
    Positive,
    #[serde(alias = "negativo")]
    Negative,
}

impl Diagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Pending => "Pending",
            Diagnosis::Positive => "Positive",
            Diagnosis::Negative => "Negative",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Some(Diagnosis::Pending),
            "positive" | "positivo" | "pregnant" => Some(Diagnosis::Positive),
            "negative" | "negativo" | "open" => Some(Diagnosis::Negative),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s)
            .ok_or_else(|| HerdOpsError::InvalidData(format!("unknown diagnosis '{}'", s)))
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One service (mating or insemination) of a female and what followed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproductiveEvent {
    pub id: i64,
    pub female_id: i64,
    #[serde(default)]
    pub male_id: Option<i64>,
    pub service_date: NaiveDate,
    #[serde(default)]
    pub diagnosis_date: Option<NaiveDate>,
    #[serde(default)]
    pub diagnosis: Option<Diagnosis>,
    #[serde(default)]
    pub estimated_parturition: Option<NaiveDate>,
    #[serde(default)]
    pub actual_parturition: Option<NaiveDate>,
    #[serde(default)]
    pub litter_size: Option<u32>,
    #[serde(default)]
    pub live_births: Option<u32>,
}

impl ReproductiveEvent {
    pub fn new(id: i64, female_id: i64, service_date: NaiveDate) -> Self {
        Self {
            id,
            female_id,
            male_id: None,
            service_date,
            diagnosis_date: None,
            diagnosis: None,
            estimated_parturition: None,
            actual_parturition: None,
            litter_size: None,
            live_births: None,
        }
    }

    pub fn with_male(mut self, male_id: i64) -> Self {
        self.male_id = Some(male_id);
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: Diagnosis, date: NaiveDate) -> Self {
        self.diagnosis = Some(diagnosis);
        self.diagnosis_date = Some(date);
        self
    }

    pub fn with_estimated_parturition(mut self, date: NaiveDate) -> Self {
        self.estimated_parturition = Some(date);
        self
    }

    pub fn with_parturition(mut self, date: NaiveDate, litter_size: u32, live_births: u32) -> Self {
        self.actual_parturition = Some(date);
        self.litter_size = Some(litter_size);
        self.live_births = Some(live_births);
        self
    }

    pub fn is_confirmed_pregnant(&self) -> bool {
        self.diagnosis == Some(Diagnosis::Positive)
    }

    /// A `Pending` result counts as not yet diagnosed.
    pub fn awaiting_diagnosis(&self) -> bool {
        matches!(self.diagnosis, None | Some(Diagnosis::Pending))
    }

    pub fn has_given_birth(&self) -> bool {
        self.actual_parturition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn diagnosis_from_str() {
        assert_eq!(Diagnosis::from_str("positivo"), Some(Diagnosis::Positive));
        assert_eq!(Diagnosis::from_str("Negative"), Some(Diagnosis::Negative));
        assert_eq!(Diagnosis::from_str("pendiente"), Some(Diagnosis::Pending));
        assert!(Diagnosis::parse("maybe").is_err());
    }

    #[test]
    fn pending_counts_as_awaiting() {
        let service = date(2024, 3, 1);
        let event = ReproductiveEvent::new(1, 10, service);
        assert!(event.awaiting_diagnosis());

        let event = event.with_diagnosis(Diagnosis::Pending, date(2024, 3, 20));
        assert!(event.awaiting_diagnosis());

        let event = event.with_diagnosis(Diagnosis::Positive, date(2024, 4, 5));
        assert!(!event.awaiting_diagnosis());
        assert!(event.is_confirmed_pregnant());
    }
}
