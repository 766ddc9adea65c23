//! # carebridge-registry
//!
//! The collaborator seam of the CareBridge translation layer.
//!
//! This crate defines the registry traits the translators consume — patient,
//! encounter, provider, concept, and care-setting lookups plus the
//! observation store — and an in-memory backend implementing all of them.
//!
//! The traits are synchronous: each translation call runs to completion
//! within one caller invocation, so the seam exposes plain blocking lookups.
//! Implementations must be `Send + Sync`; the in-memory backend reaches for
//! lock-free maps so concurrent callers never contend on the seam itself.
//!
//! ## Example
//!
//! ```
//! use carebridge_registry::{MemoryRegistry, PatientRegistry};
//! use carebridge_core::model::Patient;
//! use uuid::Uuid;
//!
//! let registry = MemoryRegistry::new();
//! let id = Uuid::new_v4();
//! registry.add_patient(Patient::new(id, "MRN-1", "Ada Example"));
//!
//! let found = registry.patient_by_uuid(id).unwrap();
//! assert_eq!(found.unwrap().identifier, "MRN-1");
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{RegistryError, Result};
pub use memory::MemoryRegistry;
pub use traits::{
    CareSettingRegistry, ConceptRegistry, EncounterRegistry, ObservationStore, PatientRegistry,
    ProviderRegistry,
};
