//! Interoperable (FHIR-shaped) resource types.
//!
//! These are the external representations the stored records translate to
//! and from. Serialization follows the wire conventions of the standard:
//! camelCase member names, absent members omitted.

mod coding;
mod extension;
mod observation;
mod reference;
mod request;

pub use coding::{CodeableConcept, Coding};
pub use extension::{CARE_SETTING_EXTENSION_URL, Extension};
pub use observation::{
    InteropObservation, ObservationRelated, ObservationStatus, ObservationValue, RelationKind,
};
pub use reference::{Reference, extract_uuid};
pub use request::{
    InteropResource, MedicationRequest, MedicationRequester, ProcedureRequest,
    ProcedureRequester, RequestResource,
};
