//! In-memory registry backend.
//!
//! Backs every registry trait with `papaya` lock-free maps. This is the
//! fixture backend for tests and the reference implementation of the seam
//! semantics: query paths exclude voided observations, raw UUID lookup does
//! not.

use papaya::HashMap as PapayaHashMap;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use carebridge_core::model::{
    CareSetting, CareSettingKind, Concept, Encounter, ObsValue, Patient, Provider,
    StoredObservation,
};

use crate::error::{RegistryError, Result};
use crate::traits::{
    CareSettingRegistry, ConceptRegistry, EncounterRegistry, ObservationStore, PatientRegistry,
    ProviderRegistry,
};

/// In-memory backend implementing every registry trait.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    patients: PapayaHashMap<Uuid, Patient>,
    encounters: PapayaHashMap<Uuid, Encounter>,
    providers: PapayaHashMap<Uuid, Provider>,
    concepts: PapayaHashMap<Uuid, Concept>,
    care_settings: PapayaHashMap<Uuid, CareSetting>,
    observations: PapayaHashMap<Uuid, StoredObservation>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-seeded with the two fixed care settings.
    pub fn with_default_care_settings() -> Self {
        let registry = Self::new();
        registry.add_care_setting(CareSetting::new(
            Uuid::new_v4(),
            "Outpatient",
            CareSettingKind::Outpatient,
        ));
        registry.add_care_setting(CareSetting::new(
            Uuid::new_v4(),
            "Inpatient",
            CareSettingKind::Inpatient,
        ));
        registry
    }

    pub fn add_patient(&self, patient: Patient) {
        self.patients.pin().insert(patient.uuid, patient);
    }

    pub fn add_encounter(&self, encounter: Encounter) {
        self.encounters.pin().insert(encounter.uuid, encounter);
    }

    pub fn add_provider(&self, provider: Provider) {
        self.providers.pin().insert(provider.uuid, provider);
    }

    pub fn add_concept(&self, concept: Concept) {
        self.concepts.pin().insert(concept.uuid, concept);
    }

    pub fn add_care_setting(&self, care_setting: CareSetting) {
        self.care_settings
            .pin()
            .insert(care_setting.uuid, care_setting);
    }

    pub fn add_observation(&self, observation: StoredObservation) {
        self.observations
            .pin()
            .insert(observation.uuid, observation);
    }

    fn collect_observations<F>(&self, mut keep: F) -> Vec<StoredObservation>
    where
        F: FnMut(&StoredObservation) -> bool,
    {
        let guard = self.observations.pin();
        guard
            .iter()
            .filter(|(_, obs)| !obs.voided && keep(obs))
            .map(|(_, obs)| obs.clone())
            .collect()
    }
}

impl PatientRegistry for MemoryRegistry {
    fn patient_by_uuid(&self, uuid: Uuid) -> Result<Option<Patient>> {
        Ok(self.patients.pin().get(&uuid).cloned())
    }

    fn patient_by_identifier(&self, identifier: &str) -> Result<Option<Patient>> {
        let guard = self.patients.pin();
        Ok(guard
            .iter()
            .map(|(_, p)| p)
            .find(|p| p.identifier == identifier)
            .cloned())
    }
}

impl EncounterRegistry for MemoryRegistry {
    fn encounter_by_uuid(&self, uuid: Uuid) -> Result<Option<Encounter>> {
        Ok(self.encounters.pin().get(&uuid).cloned())
    }
}

impl ProviderRegistry for MemoryRegistry {
    fn provider_by_uuid(&self, uuid: Uuid) -> Result<Option<Provider>> {
        Ok(self.providers.pin().get(&uuid).cloned())
    }
}

impl ConceptRegistry for MemoryRegistry {
    fn concept_by_uuid(&self, uuid: Uuid) -> Result<Option<Concept>> {
        Ok(self.concepts.pin().get(&uuid).cloned())
    }

    fn concept_by_mapping(&self, code: &str, system: &str) -> Result<Option<Concept>> {
        let guard = self.concepts.pin();
        Ok(guard
            .iter()
            .map(|(_, c)| c)
            .find(|c| c.mapping_for(system) == Some(code))
            .cloned())
    }

    fn concept_by_name(&self, name: &str) -> Result<Option<Concept>> {
        let guard = self.concepts.pin();
        Ok(guard
            .iter()
            .map(|(_, c)| c)
            .find(|c| c.display_name == name)
            .cloned())
    }
}

impl CareSettingRegistry for MemoryRegistry {
    fn care_setting_by_uuid(&self, uuid: Uuid) -> Result<Option<CareSetting>> {
        Ok(self.care_settings.pin().get(&uuid).cloned())
    }

    fn care_setting_by_kind(&self, kind: CareSettingKind) -> Result<Option<CareSetting>> {
        let guard = self.care_settings.pin();
        Ok(guard
            .iter()
            .map(|(_, cs)| cs)
            .find(|cs| cs.kind == kind)
            .cloned())
    }
}

impl ObservationStore for MemoryRegistry {
    fn observation_by_uuid(&self, uuid: Uuid) -> Result<Option<StoredObservation>> {
        Ok(self.observations.pin().get(&uuid).cloned())
    }

    fn observations_by_person_and_concept(
        &self,
        person: Uuid,
        concept: Uuid,
    ) -> Result<Vec<StoredObservation>> {
        Ok(self.collect_observations(|obs| obs.person == person && obs.concept == concept))
    }

    fn observations_by_concept(&self, concept: Uuid) -> Result<Vec<StoredObservation>> {
        Ok(self.collect_observations(|obs| obs.concept == concept))
    }

    fn observations_by_date(&self, instant: OffsetDateTime) -> Result<Vec<StoredObservation>> {
        Ok(self.collect_observations(|obs| obs.recorded_at == instant))
    }

    fn observations_by_person(&self, person: Uuid) -> Result<Vec<StoredObservation>> {
        Ok(self.collect_observations(|obs| obs.person == person))
    }

    fn observations_by_value_concept(&self, concept: Uuid) -> Result<Vec<StoredObservation>> {
        Ok(self.collect_observations(|obs| matches!(obs.value, Some(ObsValue::Coded(c)) if c == concept)))
    }

    fn observations_by_patient_identifier(
        &self,
        identifier: &str,
    ) -> Result<Vec<StoredObservation>> {
        match self.patient_by_identifier(identifier)? {
            Some(patient) => self.observations_by_person(patient.uuid),
            None => Ok(Vec::new()),
        }
    }

    fn save_observation(
        &self,
        observation: StoredObservation,
        reason: &str,
    ) -> Result<StoredObservation> {
        debug!(uuid = %observation.uuid, reason, "saving observation");
        self.observations
            .pin()
            .insert(observation.uuid, observation.clone());
        Ok(observation)
    }

    fn void_observation(&self, uuid: Uuid, reason: &str) -> Result<()> {
        let guard = self.observations.pin();
        let Some(existing) = guard.get(&uuid) else {
            return Err(RegistryError::not_found("Observation", uuid.to_string()));
        };
        let mut voided = existing.clone();
        voided.void(reason);
        guard.insert(uuid, voided);
        debug!(%uuid, reason, "voided observation");
        Ok(())
    }
}
