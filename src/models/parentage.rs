use serde::{Deserialize, Serialize};

/// Recorded parents of one offspring (cría).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parentage {
    pub offspring_id: i64,
    #[serde(default)]
    pub sire_id: Option<i64>,
    #[serde(default)]
    pub dam_id: Option<i64>,
    /// Cached coefficient as stored by the registry, not recomputed here.
    #[serde(default)]
    pub coefficient: Option<f64>,
    #[serde(default)]
    pub certified: bool,
}

impl Parentage {
    pub fn new(offspring_id: i64) -> Self {
        Self {
            offspring_id,
            sire_id: None,
            dam_id: None,
            coefficient: None,
            certified: false,
        }
    }

    pub fn with_sire(mut self, sire_id: i64) -> Self {
        self.sire_id = Some(sire_id);
        self
    }

    pub fn with_dam(mut self, dam_id: i64) -> Self {
        self.dam_id = Some(dam_id);
        self
    }

    pub fn has_parent(&self, animal_id: i64) -> bool {
        self.sire_id == Some(animal_id) || self.dam_id == Some(animal_id)
    }
}
