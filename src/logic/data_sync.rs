use crate::datasources::HerdRepository;
use crate::error::Result;
use crate::logic::alerts::AlertEngine;
use crate::models::{Alert, HerdSnapshot};
use chrono::NaiveDate;

/// Fetch every herd collection concurrently and merge them into one snapshot.
pub async fn fetch_snapshot(repo: &dyn HerdRepository) -> Result<HerdSnapshot> {
    let (animals, parentage, reproductive_events, health_events, production, weights) = tokio::try_join!(
        repo.animals(),
        repo.parentage(),
        repo.reproductive_events(),
        repo.health_events(),
        repo.production(),
        repo.weights(),
    )?;

    tracing::debug!(
        animals = animals.len(),
        reproductive_events = reproductive_events.len(),
        health_events = health_events.len(),
        "Fetched herd collections"
    );

    Ok(HerdSnapshot {
        animals,
        parentage,
        reproductive_events,
        health_events,
        production,
        weights,
    })
}

/// Read the herd from `repo` and run the alert rules over it.
pub async fn collect_alerts_from(
    repo: &dyn HerdRepository,
    engine: &AlertEngine,
    as_of: NaiveDate,
) -> Result<Vec<Alert>> {
    let snapshot = fetch_snapshot(repo).await?;
    Ok(engine.collect_alerts(&snapshot, as_of))
}

pub struct HerdSyncService {
    repo: Box<dyn HerdRepository>,
    engine: AlertEngine,
    current: Option<HerdSnapshot>,
}

impl HerdSyncService {
    pub fn new(repo: Box<dyn HerdRepository>, engine: AlertEngine) -> Self {
        Self {
            repo,
            engine,
            current: None,
        }
    }

    /// Re-read the repository. A failed read keeps the previous snapshot.
    pub async fn refresh(&mut self) -> Result<&HerdSnapshot> {
        match fetch_snapshot(self.repo.as_ref()).await {
            Ok(snapshot) => Ok(&*self.current.insert(snapshot)),
            Err(e) => {
                tracing::warn!("Failed to refresh herd data: {}", e);
                Err(e)
            }
        }
    }

    pub async fn alerts(&mut self, as_of: NaiveDate) -> Result<Vec<Alert>> {
        if self.current.is_none() {
            self.refresh().await?;
        }
        Ok(self
            .current
            .as_ref()
            .map(|herd| self.engine.collect_alerts(herd, as_of))
            .unwrap_or_default())
    }

    pub fn current(&self) -> Option<&HerdSnapshot> {
        self.current.as_ref()
    }
}
