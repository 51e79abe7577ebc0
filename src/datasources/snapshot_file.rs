use super::HerdRepository;
use crate::error::{HerdOpsError, Result};
use crate::models::{
    Animal, HealthEvent, HerdSnapshot, Parentage, ProductionEvent, ReproductiveEvent,
    WeightRecord,
};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// `.json` is JSON; everything else is parsed as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }
}

/// Herd records exported to a YAML or JSON file.
pub struct SnapshotFileSource {
    snapshot: HerdSnapshot,
}

impl SnapshotFileSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(HerdOpsError::NotFound(format!(
                "herd snapshot {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let snapshot = Self::parse(&content, SnapshotFormat::from_path(&path))?;

        tracing::info!(
            path = %path.display(),
            animals = snapshot.animals.len(),
            reproductive_events = snapshot.reproductive_events.len(),
            health_events = snapshot.health_events.len(),
            "Loaded herd snapshot"
        );

        Ok(Self { snapshot })
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<HerdSnapshot> {
        let snapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(snapshot)
    }
}

#[async_trait]
impl HerdRepository for SnapshotFileSource {
    async fn animals(&self) -> Result<Vec<Animal>> {
        self.snapshot.animals().await
    }

    async fn parentage(&self) -> Result<Vec<Parentage>> {
        self.snapshot.parentage().await
    }

    async fn reproductive_events(&self) -> Result<Vec<ReproductiveEvent>> {
        self.snapshot.reproductive_events().await
    }

    async fn health_events(&self) -> Result<Vec<HealthEvent>> {
        self.snapshot.health_events().await
    }

    async fn production(&self) -> Result<Vec<ProductionEvent>> {
        self.snapshot.production().await
    }

    async fn weights(&self) -> Result<Vec<WeightRecord>> {
        self.snapshot.weights().await
    }
}
