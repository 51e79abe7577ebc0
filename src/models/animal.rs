use crate::error::{HerdOpsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[serde(alias = "macho", alias = "m")]
    Male,
    #[serde(alias = "hembra", alias = "f")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "macho" | "m" => Some(Sex::Male),
            "female" | "hembra" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Strict variant of [`Sex::from_str`] for mapping external records.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| HerdOpsError::InvalidData(format!("unknown sex '{}'", s)))
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    #[default]
    #[serde(alias = "activo")]
    Active,
    #[serde(alias = "vendido")]
    Sold,
    #[serde(alias = "muerto", alias = "fallecido")]
    Deceased,
    #[serde(alias = "descartado")]
    Culled,
}

impl AnimalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Active => "Active",
            AnimalStatus::Sold => "Sold",
            AnimalStatus::Deceased => "Deceased",
            AnimalStatus::Culled => "Culled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" | "activo" => Some(AnimalStatus::Active),
            "sold" | "vendido" => Some(AnimalStatus::Sold),
            "deceased" | "dead" | "muerto" | "fallecido" => Some(AnimalStatus::Deceased),
            "culled" | "descartado" => Some(AnimalStatus::Culled),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s)
            .ok_or_else(|| HerdOpsError::InvalidData(format!("unknown animal status '{}'", s)))
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub sex: Sex,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub status: AnimalStatus,
}

impl Animal {
    pub fn new(id: i64, sex: Sex) -> Self {
        Self {
            id,
            tag: None,
            name: None,
            birth_date: None,
            sex,
            breed: None,
            status: AnimalStatus::Active,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: AnimalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == AnimalStatus::Active
    }

    /// Short identity used in alert messages: tag, then name, then `#id`.
    pub fn label(&self) -> String {
        self.tag
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    /// Birth date must not lie in the future.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        match self.birth_date {
            Some(birth) if birth > today => Err(HerdOpsError::InvalidData(format!(
                "animal {} has birth date {} after {}",
                self.label(),
                birth,
                today
            ))),
            _ => Ok(()),
        }
    }
}
