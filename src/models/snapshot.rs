use super::{Animal, HealthEvent, Parentage, ProductionEvent, ReproductiveEvent, WeightRecord};
use crate::error::{HerdOpsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything the rules need about a herd at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HerdSnapshot {
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub parentage: Vec<Parentage>,
    #[serde(default)]
    pub reproductive_events: Vec<ReproductiveEvent>,
    #[serde(default)]
    pub health_events: Vec<HealthEvent>,
    #[serde(default)]
    pub production: Vec<ProductionEvent>,
    #[serde(default)]
    pub weights: Vec<WeightRecord>,
}

impl HerdSnapshot {
    pub fn animal(&self, id: i64) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn parentage_of(&self, offspring_id: i64) -> Option<&Parentage> {
        self.parentage.iter().find(|p| p.offspring_id == offspring_id)
    }

    pub fn health_for(&self, animal_id: i64) -> impl Iterator<Item = &HealthEvent> {
        self.health_events
            .iter()
            .filter(move |e| e.animal_id == animal_id)
    }

    /// Label for alert messages; falls back to `#id` for animals not in the snapshot.
    pub fn label_for(&self, animal_id: i64) -> String {
        self.animal(animal_id)
            .map(|a| a.label())
            .unwrap_or_else(|| format!("#{}", animal_id))
    }

    /// Animals that are known and no longer in the herd do not produce alerts.
    pub fn is_tracked(&self, animal_id: i64) -> bool {
        self.animal(animal_id).map(|a| a.is_active()).unwrap_or(true)
    }

    /// Event records pointing at animal ids that are not in the snapshot.
    ///
    /// These are not errors: the rules still evaluate them with a `#id` label.
    pub fn unknown_references(&self) -> Vec<(&'static str, i64)> {
        let known: HashSet<i64> = self.animals.iter().map(|a| a.id).collect();
        let mut missing: Vec<(&'static str, i64)> = Vec::new();
        let mut note = |kind: &'static str, id: i64| {
            if !known.contains(&id) && !missing.contains(&(kind, id)) {
                missing.push((kind, id));
            }
        };

        for e in &self.reproductive_events {
            note("reproductive event", e.female_id);
            if let Some(male) = e.male_id {
                note("reproductive event", male);
            }
        }
        for e in &self.health_events {
            note("health event", e.animal_id);
        }
        for p in &self.production {
            note("production record", p.animal_id);
        }
        for w in &self.weights {
            note("weight record", w.animal_id);
        }

        missing
    }

    /// Checks the record-level invariants the rules rely on.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        let mut ids = HashSet::new();
        for animal in &self.animals {
            if !ids.insert(animal.id) {
                return Err(HerdOpsError::InvalidData(format!(
                    "duplicate animal id {}",
                    animal.id
                )));
            }
            animal.validate(today)?;
        }

        let mut offspring = HashSet::new();
        for record in &self.parentage {
            if !offspring.insert(record.offspring_id) {
                return Err(HerdOpsError::InvalidData(format!(
                    "more than one parentage record for offspring {}",
                    record.offspring_id
                )));
            }
            if record.has_parent(record.offspring_id) {
                return Err(HerdOpsError::InvalidData(format!(
                    "animal {} is recorded as its own parent",
                    record.offspring_id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnimalStatus, Sex};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn duplicate_parentage_is_rejected() {
        let snapshot = HerdSnapshot {
            parentage: vec![
                Parentage::new(5).with_dam(1),
                Parentage::new(5).with_sire(2),
            ],
            ..Default::default()
        };
        assert!(snapshot.validate(today()).is_err());
    }

    #[test]
    fn self_parentage_is_rejected() {
        let snapshot = HerdSnapshot {
            parentage: vec![Parentage::new(5).with_dam(5)],
            ..Default::default()
        };
        assert!(snapshot.validate(today()).is_err());
    }

    #[test]
    fn duplicate_animal_is_rejected() {
        let snapshot = HerdSnapshot {
            animals: vec![Animal::new(1, Sex::Female), Animal::new(1, Sex::Male)],
            ..Default::default()
        };
        assert!(snapshot.validate(today()).is_err());
    }

    #[test]
    fn unknown_animals_are_tracked() {
        let snapshot = HerdSnapshot {
            animals: vec![Animal::new(1, Sex::Female).with_status(AnimalStatus::Sold)],
            ..Default::default()
        };
        assert!(!snapshot.is_tracked(1));
        assert!(snapshot.is_tracked(99));
        assert_eq!(snapshot.label_for(99), "#99");
    }

    #[test]
    fn unknown_references_are_listed_once() {
        let day = today();
        let snapshot = HerdSnapshot {
            animals: vec![Animal::new(1, Sex::Female)],
            reproductive_events: vec![
                ReproductiveEvent::new(1, 1, day).with_male(7),
                ReproductiveEvent::new(2, 1, day).with_male(7),
            ],
            weights: vec![WeightRecord::new(3, day, 20.0)],
            ..Default::default()
        };
        assert_eq!(
            snapshot.unknown_references(),
            vec![("reproductive event", 7), ("weight record", 3)]
        );
    }
}
