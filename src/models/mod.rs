pub mod alert;
pub mod animal;
pub mod health;
pub mod parentage;
pub mod production;
pub mod reproduction;
pub mod snapshot;

pub use alert::*;
pub use animal::*;
pub use health::*;
pub use parentage::*;
pub use production::*;
pub use reproduction::*;
pub use snapshot::*;
