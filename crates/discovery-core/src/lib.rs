//! Discovery Core
//!
//! The stateful half of the discovery wizard:
//! - durable key-value storage ([`storage`])
//! - the Discovery State Store with write-through persistence ([`store`])
//! - the Step Navigation Controller ([`navigation`])
//! - the Case Synchronization Bridge and its collaborator ([`sync`], [`case`])
//! - the read-only export report ([`report`])
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_core::prelude::*;
//!
//! let mut store = DiscoveryStore::open(MemoryStore::new());
//! let navigator = StepNavigator::new(InMemoryCaseRegistry::new());
//!
//! store.update_data(|d| d.first_name = "Jane".into());
//! match navigator.continue_step(&mut store)? {
//!     ContinueOutcome::Blocked { missing, .. } => println!("{} fields left", missing.len()),
//!     outcome => println!("{outcome:?}"),
//! }
//! ```

#![warn(unreachable_pub)]

pub mod case;
pub mod config;
pub mod error;
pub mod navigation;
pub mod report;
pub mod storage;
pub mod store;
pub mod sync;

pub use case::{
    Case, CaseId, CaseRegistry, CaseStatus, CaseUpdate, InMemoryCaseRegistry, TimelineEvent,
};
pub use config::{DiscoveryConfig, StorageConfig};
pub use error::{DiscoveryError, NavigationError, StorageError};
pub use navigation::{allowed_jumps, validate_jump, ContinueOutcome, StepNavigator};
pub use report::DiscoveryReport;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::DiscoveryStore;
pub use sync::{case_status, compliance_missing, display_age, CaseSyncBridge};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the discovery wizard
    pub use crate::{
        CaseRegistry, ContinueOutcome, DiscoveryConfig, DiscoveryError, DiscoveryReport,
        DiscoveryStore, FileStore, InMemoryCaseRegistry, KeyValueStore, MemoryStore,
        StepNavigator,
    };
    pub use discovery_model::{DiscoveryData, StepId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
