use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilkingShift {
    #[default]
    #[serde(alias = "manana", alias = "am")]
    Morning,
    #[serde(alias = "tarde", alias = "pm")]
    Evening,
}

impl MilkingShift {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilkingShift::Morning => "Morning",
            MilkingShift::Evening => "Evening",
        }
    }
}

impl std::fmt::Display for MilkingShift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single milking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    pub animal_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub shift: MilkingShift,
    pub liters: f64,
    #[serde(default)]
    pub lactation_day: Option<u32>,
    #[serde(default)]
    pub fat_pct: Option<f64>,
    #[serde(default)]
    pub protein_pct: Option<f64>,
    #[serde(default)]
    pub somatic_cells: Option<u32>,
}

impl ProductionEvent {
    pub fn new(animal_id: i64, date: NaiveDate, liters: f64) -> Self {
        Self {
            animal_id,
            date,
            shift: MilkingShift::Morning,
            liters,
            lactation_day: None,
            fat_pct: None,
            protein_pct: None,
            somatic_cells: None,
        }
    }

    pub fn with_lactation_day(mut self, day: u32) -> Self {
        self.lactation_day = Some(day);
        self
    }

    pub fn with_composition(mut self, fat_pct: f64, protein_pct: f64) -> Self {
        self.fat_pct = Some(fat_pct);
        self.protein_pct = Some(protein_pct);
        self
    }

    pub fn with_somatic_cells(mut self, count: u32) -> Self {
        self.somatic_cells = Some(count);
        self
    }
}

/// A weighing, optionally with a body condition score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub animal_id: i64,
    pub date: NaiveDate,
    pub kg: f64,
    #[serde(default)]
    pub body_condition: Option<f64>,
}

impl WeightRecord {
    pub fn new(animal_id: i64, date: NaiveDate, kg: f64) -> Self {
        Self {
            animal_id,
            date,
            kg,
            body_condition: None,
        }
    }

    pub fn with_body_condition(mut self, score: f64) -> Self {
        self.body_condition = Some(score);
        self
    }
}
