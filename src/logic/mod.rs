pub mod age;
pub mod alerts;
pub mod breeding;
pub mod consanguinity;
pub mod data_sync;
pub mod health;
pub mod production;
pub mod report;

pub use age::Evaluation;
pub use alerts::{AlertEngine, AlertPolicy};
pub use breeding::{assess_mating, MatingAssessment, MatingProposal};
pub use data_sync::{collect_alerts_from, fetch_snapshot, HerdSyncService};
pub use report::{AnimalReport, HerdSummary};
