//! Registry traits for the collaborator seam.
//!
//! This module defines the contracts the translation core consumes. All
//! lookups return `Ok(None)` (or an empty list) when nothing matches;
//! errors are reserved for infrastructure failures.

use time::OffsetDateTime;
use uuid::Uuid;

use carebridge_core::model::{
    CareSetting, CareSettingKind, Concept, Encounter, Patient, Provider, StoredObservation,
};

use crate::error::Result;

/// Lookup of registered patients.
pub trait PatientRegistry: Send + Sync {
    /// Looks a patient up by native UUID.
    fn patient_by_uuid(&self, uuid: Uuid) -> Result<Option<Patient>>;

    /// Looks a patient up by business identifier (medical record number).
    fn patient_by_identifier(&self, identifier: &str) -> Result<Option<Patient>>;
}

/// Lookup of encounters.
pub trait EncounterRegistry: Send + Sync {
    fn encounter_by_uuid(&self, uuid: Uuid) -> Result<Option<Encounter>>;
}

/// Lookup of providers (ordering clinicians).
pub trait ProviderRegistry: Send + Sync {
    fn provider_by_uuid(&self, uuid: Uuid) -> Result<Option<Provider>>;
}

/// Lookup of concepts in the native dictionary.
pub trait ConceptRegistry: Send + Sync {
    fn concept_by_uuid(&self, uuid: Uuid) -> Result<Option<Concept>>;

    /// Looks a concept up by external mapping code within a named coding
    /// system.
    fn concept_by_mapping(&self, code: &str, system: &str) -> Result<Option<Concept>>;

    /// Looks a concept up by display name.
    fn concept_by_name(&self, name: &str) -> Result<Option<Concept>>;
}

/// Lookup of care settings.
pub trait CareSettingRegistry: Send + Sync {
    fn care_setting_by_uuid(&self, uuid: Uuid) -> Result<Option<CareSetting>>;

    /// Looks a care setting up by its fixed classification.
    fn care_setting_by_kind(&self, kind: CareSettingKind) -> Result<Option<CareSetting>>;
}

/// The observation store: lookups, queries, and audited writes.
///
/// Query methods never return voided records. `observation_by_uuid` is the
/// one raw lookup that does, so that void/update paths can reach the stored
/// record; callers translating for readers must check the void flag.
pub trait ObservationStore: Send + Sync {
    /// Raw lookup by UUID, voided records included.
    fn observation_by_uuid(&self, uuid: Uuid) -> Result<Option<StoredObservation>>;

    /// All non-voided observations recorded for a person against a concept.
    fn observations_by_person_and_concept(
        &self,
        person: Uuid,
        concept: Uuid,
    ) -> Result<Vec<StoredObservation>>;

    /// All non-voided observations against a concept, across all persons.
    fn observations_by_concept(&self, concept: Uuid) -> Result<Vec<StoredObservation>>;

    /// All non-voided observations recorded exactly at the given instant.
    fn observations_by_date(&self, instant: OffsetDateTime) -> Result<Vec<StoredObservation>>;

    /// All non-voided observations recorded for a person.
    fn observations_by_person(&self, person: Uuid) -> Result<Vec<StoredObservation>>;

    /// All non-voided observations whose coded value is the given concept.
    fn observations_by_value_concept(&self, concept: Uuid) -> Result<Vec<StoredObservation>>;

    /// All non-voided observations reachable via a patient business
    /// identifier.
    fn observations_by_patient_identifier(
        &self,
        identifier: &str,
    ) -> Result<Vec<StoredObservation>>;

    /// Persists the record (insert or overwrite) with an audit reason and
    /// returns the stored form.
    fn save_observation(
        &self,
        observation: StoredObservation,
        reason: &str,
    ) -> Result<StoredObservation>;

    /// Marks the record voided with the given reason. Fails with `NotFound`
    /// when no such record exists.
    fn void_observation(&self, uuid: Uuid, reason: &str) -> Result<()>;
}

// Compile-time object-safety checks.
#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_patient_registry_object_safe(_: &dyn PatientRegistry) {}
    fn _assert_encounter_registry_object_safe(_: &dyn EncounterRegistry) {}
    fn _assert_provider_registry_object_safe(_: &dyn ProviderRegistry) {}
    fn _assert_concept_registry_object_safe(_: &dyn ConceptRegistry) {}
    fn _assert_care_setting_registry_object_safe(_: &dyn CareSettingRegistry) {}
    fn _assert_observation_store_object_safe(_: &dyn ObservationStore) {}
}
