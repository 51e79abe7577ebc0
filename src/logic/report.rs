use crate::error::{HerdOpsError, Result};
use crate::logic::age::{
    age_in_days, describe_age, is_past_recommended_breeding_age, is_reproductively_mature,
    Evaluation,
};
use crate::logic::alerts::count_by_priority;
use crate::logic::health::{is_in_withdrawal, withdrawal_days_remaining, withdrawal_end_date};
use crate::logic::production::{
    daily_gain, has_adequate_gain, has_normal_yield, is_body_condition_optimal,
    is_somatic_cell_count_normal, milk_composition_grade, CompositionGrade, LactationStage,
};
use crate::models::{
    Alert, AnimalStatus, HealthEventKind, HerdSnapshot, PriorityCounts, Sex, WeightRecord,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Herd-wide counts for the dashboard line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HerdSummary {
    pub as_of: NaiveDate,
    pub total_animals: usize,
    pub active: usize,
    pub females: usize,
    pub males: usize,
    pub pregnant: usize,
    pub awaiting_diagnosis: usize,
    pub in_withdrawal: usize,
    pub alerts: PriorityCounts,
}

impl HerdSummary {
    pub fn build(herd: &HerdSnapshot, alerts: &[Alert], as_of: NaiveDate) -> Self {
        let active: Vec<_> = herd.animals.iter().filter(|a| a.is_active()).collect();

        let open_events = herd
            .reproductive_events
            .iter()
            .filter(|e| !e.has_given_birth() && e.service_date <= as_of)
            .filter(|e| herd.is_tracked(e.female_id));

        let pregnant: HashSet<i64> = open_events
            .clone()
            .filter(|e| e.is_confirmed_pregnant())
            .map(|e| e.female_id)
            .collect();
        let awaiting: HashSet<i64> = open_events
            .filter(|e| e.awaiting_diagnosis())
            .map(|e| e.female_id)
            .collect();

        let in_withdrawal: HashSet<i64> = herd
            .health_events
            .iter()
            .filter(|e| herd.is_tracked(e.animal_id) && is_in_withdrawal(e, as_of))
            .map(|e| e.animal_id)
            .collect();

        Self {
            as_of,
            total_animals: herd.animals.len(),
            active: active.len(),
            females: active.iter().filter(|a| a.sex == Sex::Female).count(),
            males: active.iter().filter(|a| a.sex == Sex::Male).count(),
            pregnant: pregnant.len(),
            awaiting_diagnosis: awaiting.len(),
            in_withdrawal: in_withdrawal.len(),
            alerts: count_by_priority(alerts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalStatus {
    pub event_id: i64,
    pub kind: HealthEventKind,
    pub ends: NaiveDate,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilkCheck {
    pub date: NaiveDate,
    pub liters: f64,
    pub stage: Option<LactationStage>,
    pub normal_yield: bool,
    pub somatic_cells_normal: bool,
    pub composition: CompositionGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthCheck {
    pub date: NaiveDate,
    pub kg: f64,
    pub daily_gain: Option<f64>,
    pub adequate_gain: bool,
    pub body_condition_optimal: bool,
}

/// Everything the evaluators can say about a single animal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalReport {
    pub animal_id: i64,
    pub label: String,
    pub sex: Sex,
    pub status: AnimalStatus,
    pub age: Option<String>,
    pub mature: Evaluation,
    pub past_breeding_age: Evaluation,
    pub withdrawals: Vec<WithdrawalStatus>,
    pub milk: Option<MilkCheck>,
    pub growth: Option<GrowthCheck>,
}

impl AnimalReport {
    pub fn build(herd: &HerdSnapshot, animal_id: i64, as_of: NaiveDate) -> Result<Self> {
        let animal = herd
            .animal(animal_id)
            .ok_or_else(|| HerdOpsError::NotFound(format!("animal {}", animal_id)))?;

        let withdrawals = herd
            .health_for(animal_id)
            .filter(|e| is_in_withdrawal(e, as_of))
            .map(|e| WithdrawalStatus {
                event_id: e.id,
                kind: e.kind,
                ends: withdrawal_end_date(e.date, e.withdrawal_days),
                days_remaining: withdrawal_days_remaining(e, as_of),
            })
            .collect();

        let milk = herd
            .production
            .iter()
            .filter(|p| p.animal_id == animal_id && p.date <= as_of)
            .max_by_key(|p| (p.date, p.shift))
            .map(|p| MilkCheck {
                date: p.date,
                liters: p.liters,
                stage: p.lactation_day.map(LactationStage::from_days),
                normal_yield: has_normal_yield(Some(p.liters), p.lactation_day),
                somatic_cells_normal: is_somatic_cell_count_normal(p.somatic_cells),
                composition: milk_composition_grade(p.fat_pct, p.protein_pct),
            });

        let growth = growth_check(herd, animal_id, animal.birth_date, as_of);

        Ok(Self {
            animal_id,
            label: animal.label(),
            sex: animal.sex,
            status: animal.status,
            age: animal.birth_date.map(|b| describe_age(b, as_of)),
            mature: is_reproductively_mature(animal.sex, animal.birth_date, as_of),
            past_breeding_age: is_past_recommended_breeding_age(
                animal.sex,
                animal.birth_date,
                as_of,
            ),
            withdrawals,
            milk,
            growth,
        })
    }
}

fn growth_check(
    herd: &HerdSnapshot,
    animal_id: i64,
    birth_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Option<GrowthCheck> {
    let mut weighings: Vec<&WeightRecord> = herd
        .weights
        .iter()
        .filter(|w| w.animal_id == animal_id && w.date <= as_of)
        .collect();
    weighings.sort_by_key(|w| w.date);

    let latest = *weighings.last()?;
    let gain = weighings
        .len()
        .checked_sub(2)
        .and_then(|i| daily_gain(weighings[i], latest));
    let age_days = birth_date.map(|b| age_in_days(b, latest.date));

    Some(GrowthCheck {
        date: latest.date,
        kg: latest.kg,
        daily_gain: gain,
        adequate_gain: has_adequate_gain(gain, age_days),
        body_condition_optimal: is_body_condition_optimal(latest.body_condition),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::alerts::collect_alerts;
    use crate::models::{
        Animal, Diagnosis, HealthEvent, ProductionEvent, ReproductiveEvent,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn herd() -> HerdSnapshot {
        HerdSnapshot {
            animals: vec![
                Animal::new(1, Sex::Female)
                    .with_tag("CB-01")
                    .with_birth_date(date(2022, 3, 1)),
                Animal::new(2, Sex::Female).with_birth_date(date(2024, 1, 10)),
                Animal::new(3, Sex::Male).with_birth_date(date(2021, 5, 5)),
                Animal::new(4, Sex::Female).with_status(AnimalStatus::Sold),
            ],
            reproductive_events: vec![
                ReproductiveEvent::new(10, 1, date(2024, 2, 1))
                    .with_male(3)
                    .with_diagnosis(Diagnosis::Positive, date(2024, 3, 10)),
                ReproductiveEvent::new(11, 4, date(2024, 4, 1)),
            ],
            health_events: vec![
                HealthEvent::new(20, 1, HealthEventKind::Treatment, date(2024, 5, 28))
                    .with_withdrawal(7),
                HealthEvent::new(21, 1, HealthEventKind::Deworming, date(2024, 4, 1))
                    .with_withdrawal(5),
            ],
            production: vec![
                ProductionEvent::new(1, date(2024, 5, 30), 2.4)
                    .with_lactation_day(60)
                    .with_composition(4.0, 3.2)
                    .with_somatic_cells(650_000),
                ProductionEvent::new(1, date(2024, 5, 20), 2.8).with_lactation_day(50),
            ],
            weights: vec![
                WeightRecord::new(2, date(2024, 4, 1), 12.0),
                WeightRecord::new(2, date(2024, 5, 1), 14.4).with_body_condition(3.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn summary_counts() {
        let herd = herd();
        let as_of = date(2024, 6, 1);
        let alerts = collect_alerts(&herd, as_of);
        let summary = HerdSummary::build(&herd, &alerts, as_of);

        assert_eq!(summary.total_animals, 4);
        assert_eq!(summary.active, 3);
        assert_eq!(summary.females, 2);
        assert_eq!(summary.males, 1);
        assert_eq!(summary.pregnant, 1);
        // The sold doe's open service is not counted.
        assert_eq!(summary.awaiting_diagnosis, 0);
        assert_eq!(summary.in_withdrawal, 1);
        assert_eq!(summary.alerts.total, alerts.len());
    }

    #[test]
    fn animal_report_for_milking_doe() {
        let report = AnimalReport::build(&herd(), 1, date(2024, 6, 1)).unwrap();
        assert_eq!(report.label, "CB-01");
        assert_eq!(report.age.as_deref(), Some("2y 3m"));
        assert_eq!(report.mature, Evaluation::Yes);
        assert_eq!(report.past_breeding_age, Evaluation::No);

        assert_eq!(report.withdrawals.len(), 1);
        assert_eq!(report.withdrawals[0].event_id, 20);
        assert_eq!(report.withdrawals[0].ends, date(2024, 6, 4));
        assert_eq!(report.withdrawals[0].days_remaining, 3);

        let milk = report.milk.unwrap();
        assert_eq!(milk.date, date(2024, 5, 30));
        assert_eq!(milk.stage, Some(LactationStage::Peak));
        assert!(milk.normal_yield);
        assert!(!milk.somatic_cells_normal);
        assert_eq!(milk.composition, CompositionGrade::Excellent);
        assert!(report.growth.is_none());
    }

    #[test]
    fn animal_report_growth() {
        let report = AnimalReport::build(&herd(), 2, date(2024, 6, 1)).unwrap();
        assert_eq!(report.mature, Evaluation::No);

        let growth = report.growth.unwrap();
        assert_eq!(growth.kg, 14.4);
        let gain = growth.daily_gain.unwrap();
        assert!((gain - 0.08).abs() < 1e-9);
        // 112 days old at the last weighing needs 0.080 kg/day.
        assert!(growth.adequate_gain);
        assert!(growth.body_condition_optimal);
    }

    #[test]
    fn unknown_birth_date_is_unknown_not_error() {
        let report = AnimalReport::build(&herd(), 4, date(2024, 6, 1)).unwrap();
        assert!(report.age.is_none());
        assert_eq!(report.mature, Evaluation::Unknown);
        assert_eq!(report.past_breeding_age, Evaluation::Unknown);
    }

    #[test]
    fn missing_animal_is_not_found() {
        let result = AnimalReport::build(&herd(), 99, date(2024, 6, 1));
        assert!(matches!(result, Err(HerdOpsError::NotFound(_))));
    }
}
