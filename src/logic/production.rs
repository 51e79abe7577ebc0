use crate::models::WeightRecord;
use serde::{Deserialize, Serialize};

/// Somatic cell count at or above which mastitis is suspected (cells/mL).
pub const SCC_MASTITIS_THRESHOLD: u32 = 500_000;

pub const OPTIMAL_BODY_CONDITION: (f64, f64) = (2.5, 3.5);
pub const BODY_CONDITION_SCALE: (f64, f64) = (1.0, 5.0);

/// Minimum daily gain (kg/day) expected at the given age.
pub fn expected_daily_gain(age_days: i64) -> f64 {
    if age_days <= 90 {
        0.150
    } else if age_days <= 365 {
        0.080
    } else {
        0.0
    }
}

/// Missing inputs are treated as adequate.
pub fn has_adequate_gain(actual_gain: Option<f64>, age_days: Option<i64>) -> bool {
    match (actual_gain, age_days) {
        (Some(gain), Some(age)) => gain >= expected_daily_gain(age),
        _ => true,
    }
}

/// Average kg/day between two weighings of the same animal.
pub fn daily_gain(previous: &WeightRecord, current: &WeightRecord) -> Option<f64> {
    if previous.animal_id != current.animal_id {
        return None;
    }
    let days = (current.date - previous.date).num_days();
    if days <= 0 {
        return None;
    }
    Some((current.kg - previous.kg) / days as f64)
}

/// Scores outside the 1-5 scale are treated like a missing score.
pub fn is_body_condition_optimal(score: Option<f64>) -> bool {
    let (min, max) = BODY_CONDITION_SCALE;
    match score {
        Some(s) if (min..=max).contains(&s) => {
            let (low, high) = OPTIMAL_BODY_CONDITION;
            (low..=high).contains(&s)
        }
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LactationStage {
    Early,
    Peak,
    Mid,
    Late,
}

impl LactationStage {
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=29 => LactationStage::Early,
            30..=90 => LactationStage::Peak,
            91..=180 => LactationStage::Mid,
            _ => LactationStage::Late,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LactationStage::Early => "Early",
            LactationStage::Peak => "Peak",
            LactationStage::Mid => "Mid",
            LactationStage::Late => "Late",
        }
    }

    /// Minimum liters per milking expected at this stage.
    pub fn minimum_yield(&self) -> f64 {
        match self {
            LactationStage::Early => 1.0,
            LactationStage::Peak => 2.0,
            LactationStage::Mid => 1.5,
            LactationStage::Late => 0.8,
        }
    }
}

impl std::fmt::Display for LactationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn expected_minimum_yield(lactation_days: u32) -> f64 {
    LactationStage::from_days(lactation_days).minimum_yield()
}

pub fn has_normal_yield(liters: Option<f64>, lactation_days: Option<u32>) -> bool {
    match (liters, lactation_days) {
        (Some(l), Some(d)) => l >= expected_minimum_yield(d),
        _ => true,
    }
}

pub fn is_somatic_cell_count_normal(count: Option<u32>) -> bool {
    count.map(|c| c < SCC_MASTITIS_THRESHOLD).unwrap_or(true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionGrade {
    Excellent,
    Good,
    Fair,
    Poor,
    NotEvaluated,
}

impl CompositionGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionGrade::Excellent => "Excellent",
            CompositionGrade::Good => "Good",
            CompositionGrade::Fair => "Fair",
            CompositionGrade::Poor => "Poor",
            CompositionGrade::NotEvaluated => "Not Evaluated",
        }
    }
}

impl std::fmt::Display for CompositionGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn fat_score(fat: f64) -> u8 {
    if (3.5..=4.5).contains(&fat) {
        2
    } else if (3.0..3.5).contains(&fat) || (fat > 4.5 && fat < 5.0) {
        1
    } else {
        0
    }
}

fn protein_score(protein: f64) -> u8 {
    if (3.0..=3.5).contains(&protein) {
        2
    } else if (2.5..3.0).contains(&protein) || (protein > 3.5 && protein < 4.0) {
        1
    } else {
        0
    }
}

pub fn milk_composition_grade(fat_pct: Option<f64>, protein_pct: Option<f64>) -> CompositionGrade {
    let (Some(fat), Some(protein)) = (fat_pct, protein_pct) else {
        return CompositionGrade::NotEvaluated;
    };

    match fat_score(fat) + protein_score(protein) {
        s if s >= 4 => CompositionGrade::Excellent,
        3 => CompositionGrade::Good,
        2 => CompositionGrade::Fair,
        _ => CompositionGrade::Poor,
    }
}
