pub mod snapshot_file;

pub use snapshot_file::SnapshotFileSource;

use crate::error::Result;
use crate::models::{
    Animal, HealthEvent, HerdSnapshot, Parentage, ProductionEvent, ReproductiveEvent,
    WeightRecord,
};
use async_trait::async_trait;

/// Read-only access to herd records held by the persistence layer.
///
/// Each collection is fetched independently so callers can issue the reads
/// concurrently.
#[async_trait]
pub trait HerdRepository: Send + Sync {
    async fn animals(&self) -> Result<Vec<Animal>>;

    async fn parentage(&self) -> Result<Vec<Parentage>>;

    async fn reproductive_events(&self) -> Result<Vec<ReproductiveEvent>>;

    async fn health_events(&self) -> Result<Vec<HealthEvent>>;

    async fn production(&self) -> Result<Vec<ProductionEvent>>;

    async fn weights(&self) -> Result<Vec<WeightRecord>>;
}

/// An in-memory snapshot is its own repository.
#[async_trait]
impl HerdRepository for HerdSnapshot {
    async fn animals(&self) -> Result<Vec<Animal>> {
        Ok(self.animals.clone())
    }

    async fn parentage(&self) -> Result<Vec<Parentage>> {
        Ok(self.parentage.clone())
    }

    async fn reproductive_events(&self) -> Result<Vec<ReproductiveEvent>> {
        Ok(self.reproductive_events.clone())
    }

    async fn health_events(&self) -> Result<Vec<HealthEvent>> {
        Ok(self.health_events.clone())
    }

    async fn production(&self) -> Result<Vec<ProductionEvent>> {
        Ok(self.production.clone())
    }

    async fn weights(&self) -> Result<Vec<WeightRecord>> {
        Ok(self.weights.clone())
    }
}
