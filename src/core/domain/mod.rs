//! Domain types.

mod env;
mod plan;
mod public_key;
mod repository;
mod secret;
mod sync;

pub use env::Env;
pub use plan::SyncPlan;
pub use public_key::{EncryptedSecret, PublicKey};
pub use repository::{Organization, Owner, RepoName, Repository};
pub use secret::DesiredSecret;
pub use sync::{FailureCause, SyncFailure, SyncPhase, SyncReport};
