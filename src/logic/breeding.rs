use super::age::{is_past_recommended_breeding_age, is_reproductively_mature};
use super::consanguinity::{relatedness, Relatedness, RelatednessClass};
use super::health::is_in_withdrawal;
use crate::models::{HerdSnapshot, ReproductiveEvent, Sex};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum rest after kidding before the next service.
pub const POSTPARTUM_WAIT_DAYS: i64 = 45;
/// Minimum gap between services when the previous one did not take.
pub const RESERVICE_WAIT_DAYS: i64 = 21;
/// Average goat gestation length.
pub const GESTATION_DAYS: i64 = 150;

pub fn estimated_parturition(service_date: NaiveDate) -> NaiveDate {
    service_date + Duration::days(GESTATION_DAYS)
}

/// Recorded estimate when present, otherwise service date plus gestation.
pub fn expected_parturition(event: &ReproductiveEvent) -> NaiveDate {
    event
        .estimated_parturition
        .unwrap_or_else(|| estimated_parturition(event.service_date))
}

/// Most recent service of a female on or before `before`.
pub fn latest_event_for<'a>(
    female_id: i64,
    events: &'a [ReproductiveEvent],
    before: NaiveDate,
) -> Option<&'a ReproductiveEvent> {
    events
        .iter()
        .filter(|e| e.female_id == female_id && e.service_date <= before)
        .max_by_key(|e| (e.service_date, e.id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalReason {
    FirstService,
    AfterParturition,
    AfterUnconfirmedService,
    Gestating,
}

impl IntervalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalReason::FirstService => "No prior service on record",
            IntervalReason::AfterParturition => "Rest period after kidding",
            IntervalReason::AfterUnconfirmedService => "Interval after unconfirmed service",
            IntervalReason::Gestating => "Prior service confirmed pregnant",
        }
    }
}

impl std::fmt::Display for IntervalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalCheck {
    pub satisfied: bool,
    pub reason: IntervalReason,
    pub days_elapsed: Option<i64>,
    pub days_required: Option<i64>,
}

impl IntervalCheck {
    fn unconstrained(reason: IntervalReason) -> Self {
        Self {
            satisfied: true,
            reason,
            days_elapsed: None,
            days_required: None,
        }
    }

    fn measured(reason: IntervalReason, from: NaiveDate, to: NaiveDate, required: i64) -> Self {
        let elapsed = (to - from).num_days();
        Self {
            satisfied: elapsed >= required,
            reason,
            days_elapsed: Some(elapsed),
            days_required: Some(required),
        }
    }

    /// Days still to wait, zero when satisfied.
    pub fn days_short(&self) -> i64 {
        match (self.days_elapsed, self.days_required) {
            (Some(elapsed), Some(required)) => (required - elapsed).max(0),
            _ => 0,
        }
    }
}

/// Checks the rest interval between a female's previous service and a proposed one.
pub fn minimum_wait_satisfied(prior: Option<&ReproductiveEvent>, proposed: NaiveDate) -> IntervalCheck {
    let Some(prior) = prior else {
        return IntervalCheck::unconstrained(IntervalReason::FirstService);
    };

    if let Some(kidding) = prior.actual_parturition {
        return IntervalCheck::measured(
            IntervalReason::AfterParturition,
            kidding,
            proposed,
            POSTPARTUM_WAIT_DAYS,
        );
    }

    if !prior.is_confirmed_pregnant() {
        return IntervalCheck::measured(
            IntervalReason::AfterUnconfirmedService,
            prior.service_date,
            proposed,
            RESERVICE_WAIT_DAYS,
        );
    }

    IntervalCheck::unconstrained(IntervalReason::Gestating)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatingProposal {
    pub female_id: i64,
    pub male_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum MatingIssue {
    UnknownAnimal { animal_id: i64 },
    WrongSex { animal_id: i64, expected: Sex },
    NotActive { animal_id: i64 },
    Immature { animal_id: i64 },
    MaturityUnknown { animal_id: i64 },
    PastBreedingAge { animal_id: i64 },
    Related { class: RelatednessClass, coefficient: f64 },
    PedigreeUnknown,
    IntervalNotMet { reason: IntervalReason, days_short: i64 },
    FemaleGestating,
    FemaleInWithdrawal,
}

impl MatingIssue {
    pub fn describe(&self) -> String {
        match self {
            MatingIssue::UnknownAnimal { animal_id } => {
                format!("Animal #{} is not in the herd records", animal_id)
            }
            MatingIssue::WrongSex { animal_id, expected } => {
                format!("Animal #{} is not {}", animal_id, expected.as_str().to_lowercase())
            }
            MatingIssue::NotActive { animal_id } => {
                format!("Animal #{} is no longer active in the herd", animal_id)
            }
            MatingIssue::Immature { animal_id } => {
                format!("Animal #{} has not reached reproductive maturity", animal_id)
            }
            MatingIssue::MaturityUnknown { animal_id } => {
                format!("Animal #{} has no birth date; maturity not checked", animal_id)
            }
            MatingIssue::PastBreedingAge { animal_id } => {
                format!("Animal #{} is past the recommended breeding age", animal_id)
            }
            MatingIssue::Related { class, coefficient } => {
                format!("{} (coefficient {:.4})", class, coefficient)
            }
            MatingIssue::PedigreeUnknown => {
                "Parentage missing for one or both animals; inbreeding not checked".to_string()
            }
            MatingIssue::IntervalNotMet { reason, days_short } => {
                format!("{}: {} more day(s) required", reason, days_short)
            }
            MatingIssue::FemaleGestating => {
                "Female has a confirmed pregnancy without recorded kidding".to_string()
            }
            MatingIssue::FemaleInWithdrawal => {
                "Female is within a medication withdrawal period".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatingAssessment {
    pub proposal: MatingProposal,
    pub relatedness: Relatedness,
    pub interval: IntervalCheck,
    pub blocking: Vec<MatingIssue>,
    pub warnings: Vec<MatingIssue>,
}

impl MatingAssessment {
    pub fn is_allowed(&self) -> bool {
        self.blocking.is_empty()
    }
}

/// Runs every pre-service check for a proposed pairing.
///
/// Missing data (birth dates, parentage) only produces warnings; the caller
/// decides whether to proceed.
pub fn assess_mating(proposal: MatingProposal, herd: &HerdSnapshot) -> MatingAssessment {
    let mut blocking = Vec::new();
    let mut warnings = Vec::new();
    let as_of = proposal.date;

    for (animal_id, expected) in [
        (proposal.female_id, Sex::Female),
        (proposal.male_id, Sex::Male),
    ] {
        let Some(animal) = herd.animal(animal_id) else {
            blocking.push(MatingIssue::UnknownAnimal { animal_id });
            continue;
        };

        if animal.sex != expected {
            blocking.push(MatingIssue::WrongSex {
                animal_id,
                expected,
            });
        }
        if !animal.is_active() {
            blocking.push(MatingIssue::NotActive { animal_id });
        }

        let maturity = is_reproductively_mature(animal.sex, animal.birth_date, as_of);
        if maturity.is_blocking_when_required() {
            blocking.push(MatingIssue::Immature { animal_id });
        } else if maturity.is_unknown() {
            warnings.push(MatingIssue::MaturityUnknown { animal_id });
        }

        if is_past_recommended_breeding_age(animal.sex, animal.birth_date, as_of).is_yes() {
            warnings.push(MatingIssue::PastBreedingAge { animal_id });
        }
    }

    let related = relatedness(
        herd.parentage_of(proposal.female_id),
        herd.parentage_of(proposal.male_id),
    );
    match related.class {
        RelatednessClass::Unknown => warnings.push(MatingIssue::PedigreeUnknown),
        class if related.blocks() => blocking.push(MatingIssue::Related {
            class,
            coefficient: related.coefficient,
        }),
        RelatednessClass::HalfSibling => warnings.push(MatingIssue::Related {
            class: related.class,
            coefficient: related.coefficient,
        }),
        _ => {}
    }

    let prior = latest_event_for(proposal.female_id, &herd.reproductive_events, as_of);
    let interval = minimum_wait_satisfied(prior, as_of);
    if !interval.satisfied {
        blocking.push(MatingIssue::IntervalNotMet {
            reason: interval.reason,
            days_short: interval.days_short(),
        });
    }
    if interval.reason == IntervalReason::Gestating {
        warnings.push(MatingIssue::FemaleGestating);
    }

    if herd
        .health_for(proposal.female_id)
        .any(|e| is_in_withdrawal(e, as_of))
    {
        warnings.push(MatingIssue::FemaleInWithdrawal);
    }

    tracing::debug!(
        female = proposal.female_id,
        male = proposal.male_id,
        blocking = blocking.len(),
        warnings = warnings.len(),
        "Mating assessed"
    );

    MatingAssessment {
        proposal,
        relatedness: related,
        interval,
        blocking,
        warnings,
    }
}
