//! Stored (native) clinical records.
//!
//! All records are identified by UUID and owned by the persistence layer.
//! The types here carry only the fields the translation core reads or
//! writes; anything else the persistence layer tracks stays behind its
//! registry seam.

mod care_setting;
mod concept;
mod observation;
mod order;
mod people;

pub use care_setting::{CareSetting, CareSettingKind};
pub use concept::{Concept, ConceptMapping};
pub use observation::{ObsValue, StoredObservation};
pub use order::StoredRequest;
pub use people::{Encounter, Patient, Provider};
