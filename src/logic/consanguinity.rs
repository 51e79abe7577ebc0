use crate::models::Parentage;
use serde::{Deserialize, Serialize};

/// Contribution of each recorded parent two animals share.
pub const SHARED_PARENT_INCREMENT: f64 = 0.25;
/// Coefficients above this block a mating.
pub const BLOCKING_THRESHOLD: f64 = 0.25;
pub const FULL_SIBLING_COEFFICIENT: f64 = 0.5;
pub const PARENT_CHILD_COEFFICIENT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatednessClass {
    ParentChild,
    FullSibling,
    HalfSibling,
    Unrelated,
    Unknown,
}

impl RelatednessClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelatednessClass::ParentChild => "Parent-Child",
            RelatednessClass::FullSibling => "Full Siblings",
            RelatednessClass::HalfSibling => "Half Siblings",
            RelatednessClass::Unrelated => "Unrelated",
            RelatednessClass::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RelatednessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Acceptable,
    Block,
    /// Parentage not on record. Does not block.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient <= 0.0 {
            RiskLevel::None
        } else if coefficient <= 0.0625 {
            RiskLevel::Low
        } else if coefficient <= 0.125 {
            RiskLevel::Medium
        } else if coefficient <= 0.25 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relatedness {
    pub class: RelatednessClass,
    pub coefficient: f64,
    pub verdict: Verdict,
}

impl Relatedness {
    fn unknown() -> Self {
        Self {
            class: RelatednessClass::Unknown,
            coefficient: 0.0,
            verdict: Verdict::Unknown,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_coefficient(self.coefficient)
    }

    pub fn blocks(&self) -> bool {
        self.verdict == Verdict::Block
    }
}

/// Estimates how closely two animals are related from their recorded parents.
///
/// Only immediate parents are compared (parent-child and shared sire/dam);
/// deeper pedigree paths are not walked.
pub fn relatedness(a: Option<&Parentage>, b: Option<&Parentage>) -> Relatedness {
    let (Some(a), Some(b)) = (a, b) else {
        return Relatedness::unknown();
    };

    if a.has_parent(b.offspring_id) || b.has_parent(a.offspring_id) {
        return Relatedness {
            class: RelatednessClass::ParentChild,
            coefficient: PARENT_CHILD_COEFFICIENT,
            verdict: Verdict::Block,
        };
    }

    let same_sire = matches!((a.sire_id, b.sire_id), (Some(x), Some(y)) if x == y);
    let same_dam = matches!((a.dam_id, b.dam_id), (Some(x), Some(y)) if x == y);

    if same_sire && same_dam {
        return Relatedness {
            class: RelatednessClass::FullSibling,
            coefficient: FULL_SIBLING_COEFFICIENT,
            verdict: Verdict::Block,
        };
    }

    let shared = usize::from(same_sire) + usize::from(same_dam);
    if shared == 0 {
        return Relatedness {
            class: RelatednessClass::Unrelated,
            coefficient: 0.0,
            verdict: Verdict::Acceptable,
        };
    }

    let coefficient = (shared as f64 * SHARED_PARENT_INCREMENT).min(1.0);
    let verdict = if coefficient > BLOCKING_THRESHOLD {
        Verdict::Block
    } else {
        Verdict::Acceptable
    };

    Relatedness {
        class: RelatednessClass::HalfSibling,
        coefficient,
        verdict,
    }
}
