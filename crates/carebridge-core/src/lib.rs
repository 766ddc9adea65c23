//! # carebridge-core
//!
//! Native clinical domain model and interop resource types for the
//! CareBridge translation layer.
//!
//! The crate has two halves:
//! - [`model`] — the stored (native) records: patients, encounters,
//!   providers, concepts, care settings, observations, and orders. These are
//!   owned by the surrounding persistence layer; the translation core only
//!   reads them and, on update, mutates a small set of fields.
//! - [`fhir`] — the interoperable resource shapes those records translate to
//!   and from, plus the cross-reference conventions shared by both
//!   directions.

pub mod audit;
pub mod fhir;
pub mod model;

pub use fhir::{
    CARE_SETTING_EXTENSION_URL, CodeableConcept, Coding, Extension, InteropObservation,
    InteropResource, MedicationRequest, MedicationRequester, ObservationRelated,
    ObservationStatus, ObservationValue, ProcedureRequest, ProcedureRequester, Reference,
    RequestResource, extract_uuid,
};
pub use model::{
    CareSetting, CareSettingKind, Concept, ConceptMapping, Encounter, ObsValue, Patient,
    Provider, StoredObservation, StoredRequest,
};
