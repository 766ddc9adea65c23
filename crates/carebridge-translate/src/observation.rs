//! The observation translator.
//!
//! Converts stored observations to and from their interoperable shape:
//! lookup and search entry points, soft delete, and the create/update
//! reconciliation path. Group membership travels as "related" entries whose
//! targets are resolved back to stored records by UUID.

use std::collections::HashSet;
use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use carebridge_core::audit;
use carebridge_core::fhir::{
    CodeableConcept, Coding, InteropObservation, ObservationRelated, ObservationValue, Reference,
};
use carebridge_core::model::{ObsValue, StoredObservation};
use carebridge_registry::{
    ConceptRegistry, EncounterRegistry, ObservationStore, PatientRegistry,
};

use crate::coding::{CodingConfig, CodingResolver, ConceptResolution, ConceptSelector};
use crate::error::{Result, TranslateError};
use crate::issues::Issues;
use crate::refs;

const MISSING_SUBJECT_ISSUE: &str = "subject cannot be empty";
const UNKNOWN_SUBJECT_ISSUE: &str = "no patient found for the subject reference";
const MISSING_CODE_ISSUE: &str = "code cannot be empty";
const UNRESOLVED_CODE_ISSUE: &str = "no concept found for the observation code";
const MISSING_EFFECTIVE_ISSUE: &str = "effective date-time cannot be empty";
const UNRESOLVED_VALUE_ISSUE: &str = "no concept found for the coded value";

/// Translates stored observations to and from interop resources.
pub struct ObservationTranslator {
    store: Arc<dyn ObservationStore>,
    patients: Arc<dyn PatientRegistry>,
    encounters: Arc<dyn EncounterRegistry>,
    concepts: Arc<dyn ConceptRegistry>,
    coding: CodingResolver,
}

impl ObservationTranslator {
    pub fn new(
        store: Arc<dyn ObservationStore>,
        patients: Arc<dyn PatientRegistry>,
        encounters: Arc<dyn EncounterRegistry>,
        concepts: Arc<dyn ConceptRegistry>,
        config: CodingConfig,
    ) -> Self {
        let coding = CodingResolver::new(concepts.clone(), config);
        Self {
            store,
            patients,
            encounters,
            concepts,
            coding,
        }
    }

    /// Looks an observation up by identifier. Absent and voided records both
    /// come back as `None`.
    pub fn fetch_by_identifier(&self, id: Uuid) -> Result<Option<InteropObservation>> {
        let Some(observation) = self.store.observation_by_uuid(id)? else {
            return Ok(None);
        };
        if observation.voided {
            return Ok(None);
        }
        Ok(Some(self.to_resource(&observation)?))
    }

    /// List form of [`fetch_by_identifier`](Self::fetch_by_identifier):
    /// zero-or-one element, matching the other search entry points.
    pub fn search_by_identifier(&self, id: Uuid) -> Result<Vec<InteropObservation>> {
        Ok(self.fetch_by_identifier(id)?.into_iter().collect())
    }

    /// All observations for a person matching any of the selectors.
    ///
    /// A selector whose terminology URI maps to no known coding system
    /// terminates the call, returning the partial list accumulated from the
    /// selectors before it.
    pub fn search_by_person_and_concept(
        &self,
        person: Uuid,
        selectors: &[ConceptSelector],
    ) -> Result<Vec<InteropObservation>> {
        let mut results = Vec::new();
        let Some(patient) = self.patients.patient_by_uuid(person)? else {
            debug!(%person, "person not found; observation search is empty");
            return Ok(results);
        };
        for selector in selectors {
            let concept = match self.coding.resolve(selector)? {
                ConceptResolution::Resolved(concept) => concept,
                ConceptResolution::Unresolved => continue,
                ConceptResolution::UnknownSystem(uri) => {
                    warn!(%uri, "unknown coding system; returning partial results");
                    return Ok(results);
                }
            };
            for observation in self
                .store
                .observations_by_person_and_concept(patient.uuid, concept.uuid)?
            {
                results.push(self.to_resource(&observation)?);
            }
        }
        Ok(results)
    }

    /// All observations matching any of the selectors, across all persons.
    ///
    /// Same early-exit contract as
    /// [`search_by_person_and_concept`](Self::search_by_person_and_concept);
    /// additionally a selector that resolves to no concept terminates the
    /// call with the partial list.
    pub fn search_by_code(&self, selectors: &[ConceptSelector]) -> Result<Vec<InteropObservation>> {
        let mut results = Vec::new();
        for selector in selectors {
            let concept = match self.coding.resolve(selector)? {
                ConceptResolution::Resolved(concept) => concept,
                ConceptResolution::Unresolved => {
                    debug!(code = %selector.code, "selector resolved to no concept; returning partial results");
                    return Ok(results);
                }
                ConceptResolution::UnknownSystem(uri) => {
                    warn!(%uri, "unknown coding system; returning partial results");
                    return Ok(results);
                }
            };
            for observation in self.store.observations_by_concept(concept.uuid)? {
                results.push(self.to_resource(&observation)?);
            }
        }
        Ok(results)
    }

    /// All observations recorded exactly at the given instant.
    pub fn search_by_date(&self, instant: OffsetDateTime) -> Result<Vec<InteropObservation>> {
        self.store
            .observations_by_date(instant)?
            .iter()
            .map(|observation| self.to_resource(observation))
            .collect()
    }

    /// All observations recorded for a person.
    pub fn search_by_person(&self, person: Uuid) -> Result<Vec<InteropObservation>> {
        self.store
            .observations_by_person(person)?
            .iter()
            .map(|observation| self.to_resource(observation))
            .collect()
    }

    /// All observations whose coded value is the concept with the given
    /// display name.
    pub fn search_by_value_concept(&self, concept_name: &str) -> Result<Vec<InteropObservation>> {
        let Some(concept) = self.concepts.concept_by_name(concept_name)? else {
            return Ok(Vec::new());
        };
        self.store
            .observations_by_value_concept(concept.uuid)?
            .iter()
            .map(|observation| self.to_resource(observation))
            .collect()
    }

    /// All observations reachable via a patient business identifier.
    pub fn search_by_patient_identifier(
        &self,
        identifier: &str,
    ) -> Result<Vec<InteropObservation>> {
        self.store
            .observations_by_patient_identifier(identifier)?
            .iter()
            .map(|observation| self.to_resource(observation))
            .collect()
    }

    /// Soft-deletes: marks the record voided with the fixed system reason.
    /// Voided records disappear from every subsequent fetch and search path.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.store.void_observation(id, audit::VOIDED_VIA_INTEROP)?;
        Ok(())
    }

    /// Creates a stored observation from an interop resource.
    ///
    /// The context reference is resolved to an encounter when possible; a
    /// context that does not resolve creates the observation unattached.
    /// Related targets that do not resolve are skipped silently; the
    /// resolved set becomes the group membership. All recorded conversion
    /// issues are checked at one gate before persistence.
    pub fn create(&self, input: InteropObservation) -> Result<InteropObservation> {
        let mut issues = Issues::new();
        let mut draft = self.draft_from_resource(&input, &mut issues)?;

        if let Some(context) = &input.context {
            match refs::resolve_encounter(self.encounters.as_ref(), context)? {
                Some(encounter) => draft.encounter = Some(encounter.uuid),
                None => debug!(
                    reference = context.reference.as_deref(),
                    "context did not resolve; creating unattached"
                ),
            }
        }

        for related in &input.related {
            let Some(target) = related.target.target_uuid() else {
                debug!("related target has no extractable identifier; skipping");
                continue;
            };
            match self.store.observation_by_uuid(target)? {
                Some(member) => {
                    draft.group_members.insert(member.uuid);
                }
                None => debug!(%target, "related target did not resolve; skipping"),
            }
        }

        issues.into_result()?;
        let saved = self
            .store
            .save_observation(draft.into_stored()?, audit::CREATED_VIA_INTEROP)?;
        self.to_resource(&saved)
    }

    /// Updates the stored observation with the given identifier, merging the
    /// input's attributes onto the existing record. When no record exists,
    /// the input is stamped with `id` and the call becomes a create.
    pub fn update(&self, input: InteropObservation, id: Uuid) -> Result<InteropObservation> {
        match self.store.observation_by_uuid(id)? {
            Some(mut existing) => {
                let mut issues = Issues::new();
                let draft = self.draft_from_resource(&input, &mut issues)?;
                issues.into_result()?;
                draft.apply_to(&mut existing);
                let saved = self
                    .store
                    .save_observation(existing, audit::UPDATED_VIA_INTEROP)?;
                self.to_resource(&saved)
            }
            None => {
                let mut input = input;
                if input.id.is_none() {
                    input.id = Some(id.to_string());
                }
                self.create(input)
            }
        }
    }

    /// Converts a stored observation to its interop shape.
    fn to_resource(&self, observation: &StoredObservation) -> Result<InteropObservation> {
        let code = match self.concepts.concept_by_uuid(observation.concept)? {
            Some(concept) => self.coding.codeable_concept(&concept),
            // Concept missing from the dictionary: emit the bare native code.
            None => CodeableConcept::default().with_coding(Coding {
                system: None,
                code: observation.concept.to_string(),
                display: None,
            }),
        };

        let mut subject = Reference::to("Patient", observation.person);
        if let Some(patient) = self.patients.patient_by_uuid(observation.person)? {
            subject = subject.with_display(patient.display_name);
        }

        let value = match &observation.value {
            Some(ObsValue::Numeric { value, unit }) => Some(ObservationValue::ValueQuantity {
                value: *value,
                unit: unit.clone(),
            }),
            Some(ObsValue::Text(text)) => Some(ObservationValue::ValueString(text.clone())),
            Some(ObsValue::Coded(answer)) => {
                let concept = match self.concepts.concept_by_uuid(*answer)? {
                    Some(concept) => self.coding.codeable_concept(&concept),
                    None => CodeableConcept::default().with_coding(Coding {
                        system: None,
                        code: answer.to_string(),
                        display: None,
                    }),
                };
                Some(ObservationValue::ValueCodeableConcept(concept))
            }
            None => None,
        };

        let related = observation
            .group_members
            .iter()
            .map(|member| ObservationRelated::has_member(Reference::to("Observation", *member)))
            .collect();

        Ok(InteropObservation {
            id: Some(observation.uuid.to_string()),
            status: Default::default(),
            code: Some(code),
            subject: Some(subject),
            context: observation
                .encounter
                .map(|encounter| Reference::to("Encounter", encounter)),
            effective_date_time: Some(observation.recorded_at),
            value,
            related,
        })
    }

    /// Converts an interop resource into a transient draft, recording every
    /// conversion problem into `issues`. The draft is persisted (or merged)
    /// only after the caller's validation gate passes.
    fn draft_from_resource(
        &self,
        resource: &InteropObservation,
        issues: &mut Issues,
    ) -> Result<ObservationDraft> {
        let mut draft = ObservationDraft {
            uuid: resource
                .id
                .as_deref()
                .and_then(|id| Uuid::parse_str(id).ok()),
            ..Default::default()
        };

        match &resource.subject {
            Some(subject) => match refs::resolve_patient(self.patients.as_ref(), subject)? {
                Some(patient) => draft.person = Some(patient.uuid),
                None => issues.push(UNKNOWN_SUBJECT_ISSUE),
            },
            None => issues.push(MISSING_SUBJECT_ISSUE),
        }

        match &resource.code {
            Some(code) => match self.resolve_code(code)? {
                Some(concept) => draft.concept = Some(concept),
                None => issues.push(UNRESOLVED_CODE_ISSUE),
            },
            None => issues.push(MISSING_CODE_ISSUE),
        }

        match resource.effective_date_time {
            Some(instant) => draft.recorded_at = Some(instant),
            None => issues.push(MISSING_EFFECTIVE_ISSUE),
        }

        draft.value = match &resource.value {
            Some(ObservationValue::ValueQuantity { value, unit }) => Some(ObsValue::Numeric {
                value: *value,
                unit: unit.clone(),
            }),
            Some(ObservationValue::ValueString(text)) => Some(ObsValue::Text(text.clone())),
            Some(ObservationValue::ValueCodeableConcept(concept)) => {
                match self.resolve_code(concept)? {
                    Some(answer) => Some(ObsValue::Coded(answer)),
                    None => {
                        issues.push(UNRESOLVED_VALUE_ISSUE);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(draft)
    }

    /// Resolves a codeable concept to a native concept UUID by trying its
    /// codings in order.
    fn resolve_code(&self, code: &CodeableConcept) -> Result<Option<Uuid>> {
        for coding in &code.coding {
            if let Some(concept) = self.coding.resolve_coding(coding)? {
                return Ok(Some(concept.uuid));
            }
        }
        Ok(None)
    }
}

/// A transient stored-observation shape built from an interop resource.
///
/// Required attributes stay optional here so that conversion can record
/// issues instead of failing; [`into_stored`](Self::into_stored) runs after
/// the validation gate, [`apply_to`](Self::apply_to) merges onto an existing
/// record attribute by attribute.
#[derive(Debug, Default)]
struct ObservationDraft {
    uuid: Option<Uuid>,
    person: Option<Uuid>,
    encounter: Option<Uuid>,
    concept: Option<Uuid>,
    value: Option<ObsValue>,
    recorded_at: Option<OffsetDateTime>,
    group_members: HashSet<Uuid>,
}

impl ObservationDraft {
    fn into_stored(self) -> Result<StoredObservation> {
        let (Some(person), Some(concept), Some(recorded_at)) =
            (self.person, self.concept, self.recorded_at)
        else {
            return Err(TranslateError::validation(vec![
                "observation draft is missing required attributes".to_string(),
            ]));
        };
        let mut observation = StoredObservation::new(
            self.uuid.unwrap_or_else(Uuid::new_v4),
            person,
            concept,
            recorded_at,
        );
        observation.encounter = self.encounter;
        observation.value = self.value;
        observation.group_members = self.group_members;
        Ok(observation)
    }

    /// Attribute-by-attribute merge onto an existing record: required
    /// attributes overwrite, optional ones only when the draft carries them.
    fn apply_to(&self, existing: &mut StoredObservation) {
        if let Some(person) = self.person {
            existing.person = person;
        }
        if let Some(concept) = self.concept {
            existing.concept = concept;
        }
        if let Some(recorded_at) = self.recorded_at {
            existing.recorded_at = recorded_at;
        }
        if let Some(encounter) = self.encounter {
            existing.encounter = Some(encounter);
        }
        if self.value.is_some() {
            existing.value = self.value.clone();
        }
        if !self.group_members.is_empty() {
            existing.group_members = self.group_members.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebridge_core::model::{Concept, Encounter, Patient};
    use carebridge_registry::MemoryRegistry;

    struct Fixture {
        registry: Arc<MemoryRegistry>,
        translator: ObservationTranslator,
        patient: Patient,
        encounter: Encounter,
        glucose: Concept,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(MemoryRegistry::with_default_care_settings());
        let patient = Patient::new(Uuid::new_v4(), "MRN-1", "Ada Example");
        let encounter = Encounter::new(Uuid::new_v4(), patient.uuid);
        let glucose = Concept::new(Uuid::new_v4(), "Serum glucose").with_mapping("2345-7", "LOINC");
        registry.add_patient(patient.clone());
        registry.add_encounter(encounter.clone());
        registry.add_concept(glucose.clone());

        let translator = ObservationTranslator::new(
            registry.clone(),
            registry.clone(),
            registry.clone(),
            registry.clone(),
            CodingConfig::native(),
        );
        Fixture {
            registry,
            translator,
            patient,
            encounter,
            glucose,
        }
    }

    fn stored_glucose(f: &Fixture) -> StoredObservation {
        StoredObservation::new(
            Uuid::new_v4(),
            f.patient.uuid,
            f.glucose.uuid,
            OffsetDateTime::UNIX_EPOCH,
        )
        .with_encounter(f.encounter.uuid)
        .with_value(ObsValue::Numeric {
            value: 5.4,
            unit: Some("mmol/L".to_string()),
        })
    }

    fn interop_glucose(f: &Fixture) -> InteropObservation {
        InteropObservation {
            code: Some(
                CodeableConcept::default()
                    .with_coding(Coding::native(f.glucose.uuid.to_string(), "Serum glucose")),
            ),
            subject: Some(Reference::to("Patient", f.patient.uuid)),
            effective_date_time: Some(OffsetDateTime::UNIX_EPOCH),
            value: Some(ObservationValue::ValueQuantity {
                value: 5.4,
                unit: Some("mmol/L".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_round_trips_stored_fields() {
        let f = fixture();
        let stored = stored_glucose(&f);
        f.registry.add_observation(stored.clone());

        let resource = f
            .translator
            .fetch_by_identifier(stored.uuid)
            .unwrap()
            .unwrap();

        assert_eq!(resource.id.as_deref(), Some(stored.uuid.to_string().as_str()));
        let subject = resource.subject.unwrap();
        assert_eq!(subject.target_uuid(), Some(f.patient.uuid));
        assert_eq!(subject.display.as_deref(), Some("Ada Example"));
        assert_eq!(
            resource.context.unwrap().target_uuid(),
            Some(f.encounter.uuid)
        );
        assert_eq!(resource.effective_date_time, Some(stored.recorded_at));
        let code = resource.code.unwrap();
        assert_eq!(code.text.as_deref(), Some("Serum glucose"));
        assert_eq!(code.coding[0].code, f.glucose.uuid.to_string());
        assert!(matches!(
            resource.value,
            Some(ObservationValue::ValueQuantity { value, .. }) if value == 5.4
        ));
    }

    #[test]
    fn test_fetch_voided_is_none() {
        let f = fixture();
        let mut stored = stored_glucose(&f);
        stored.void("entered in error");
        f.registry.add_observation(stored.clone());

        assert!(f.translator.fetch_by_identifier(stored.uuid).unwrap().is_none());
        assert!(f.translator.search_by_identifier(stored.uuid).unwrap().is_empty());
    }

    #[test]
    fn test_delete_hides_record_from_every_search_path() {
        let f = fixture();
        let stored = stored_glucose(&f);
        f.registry.add_observation(stored.clone());

        f.translator.delete(stored.uuid).unwrap();

        let selector = ConceptSelector::native(f.glucose.uuid);
        assert!(f.translator.fetch_by_identifier(stored.uuid).unwrap().is_none());
        assert!(
            f.translator
                .search_by_person_and_concept(f.patient.uuid, &[selector.clone()])
                .unwrap()
                .is_empty()
        );
        assert!(f.translator.search_by_code(&[selector]).unwrap().is_empty());
        assert!(
            f.translator
                .search_by_date(stored.recorded_at)
                .unwrap()
                .is_empty()
        );
        assert!(f.translator.search_by_person(f.patient.uuid).unwrap().is_empty());
        assert!(
            f.translator
                .search_by_patient_identifier("MRN-1")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_search_by_person_and_concept_early_exit_on_unknown_system() {
        let f = fixture();
        let pressure = Concept::new(Uuid::new_v4(), "Blood pressure");
        f.registry.add_concept(pressure.clone());
        f.registry.add_observation(stored_glucose(&f));
        f.registry.add_observation(StoredObservation::new(
            Uuid::new_v4(),
            f.patient.uuid,
            pressure.uuid,
            OffsetDateTime::UNIX_EPOCH,
        ));

        let selectors = [
            ConceptSelector::native(f.glucose.uuid),
            ConceptSelector::external("85354-9", "http://example.org/unknown"),
            ConceptSelector::native(pressure.uuid),
        ];
        let results = f
            .translator
            .search_by_person_and_concept(f.patient.uuid, &selectors)
            .unwrap();

        // Only the selector before the unknown system contributes.
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].code.as_ref().unwrap().coding[0].code,
            f.glucose.uuid.to_string()
        );
    }

    #[test]
    fn test_search_by_code_early_exit_on_unresolved_concept() {
        let f = fixture();
        f.registry.add_observation(stored_glucose(&f));

        let selectors = [
            ConceptSelector::native(f.glucose.uuid),
            ConceptSelector::native(Uuid::new_v4()),
            ConceptSelector::native(f.glucose.uuid),
        ];
        let results = f.translator.search_by_code(&selectors).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_by_code_early_exit_on_unknown_system() {
        let f = fixture();
        f.registry.add_observation(stored_glucose(&f));

        let selectors = [
            ConceptSelector::external("2345-7", "http://loinc.org"),
            ConceptSelector::external("x", "http://example.org/unknown"),
        ];
        let results = f.translator.search_by_code(&selectors).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_by_person_and_concept_unknown_person_is_empty() {
        let f = fixture();
        f.registry.add_observation(stored_glucose(&f));
        let results = f
            .translator
            .search_by_person_and_concept(Uuid::new_v4(), &[ConceptSelector::native(f.glucose.uuid)])
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_by_value_concept() {
        let f = fixture();
        let positive = Concept::new(Uuid::new_v4(), "Positive");
        f.registry.add_concept(positive.clone());
        let mut stored = stored_glucose(&f);
        stored.value = Some(ObsValue::Coded(positive.uuid));
        f.registry.add_observation(stored);

        assert_eq!(f.translator.search_by_value_concept("Positive").unwrap().len(), 1);
        assert!(f.translator.search_by_value_concept("Negative").unwrap().is_empty());
    }

    #[test]
    fn test_create_attaches_resolvable_related_and_skips_the_rest() {
        let f = fixture();
        let member = stored_glucose(&f);
        f.registry.add_observation(member.clone());

        let mut input = interop_glucose(&f);
        input.related = vec![
            ObservationRelated::has_member(Reference::to("Observation", member.uuid)),
            ObservationRelated::has_member(Reference::to("Observation", Uuid::new_v4())),
        ];

        let created = f.translator.create(input).unwrap();
        let created_id = Uuid::parse_str(created.id.as_deref().unwrap()).unwrap();
        let stored = f.registry.observation_by_uuid(created_id).unwrap().unwrap();

        assert_eq!(stored.group_members, HashSet::from([member.uuid]));
        assert_eq!(created.related.len(), 1);
        assert_eq!(created.related[0].target.target_uuid(), Some(member.uuid));
    }

    #[test]
    fn test_create_with_context() {
        let f = fixture();
        let mut input = interop_glucose(&f);
        input.context = Some(Reference::to("Encounter", f.encounter.uuid));

        let created = f.translator.create(input).unwrap();
        assert_eq!(
            created.context.unwrap().target_uuid(),
            Some(f.encounter.uuid)
        );
    }

    #[test]
    fn test_create_with_unknown_context_is_unattached_not_an_error() {
        let f = fixture();
        let mut input = interop_glucose(&f);
        input.context = Some(Reference::to("Encounter", Uuid::new_v4()));

        let created = f.translator.create(input).unwrap();
        assert!(created.context.is_none());
    }

    #[test]
    fn test_create_aborts_on_accumulated_issues_without_persisting() {
        let f = fixture();
        let mut input = interop_glucose(&f);
        input.subject = Some(Reference::to("Patient", Uuid::new_v4()));
        input.code = None;

        let err = f.translator.create(input).unwrap_err();
        let issues = err.issues().unwrap();
        assert_eq!(issues, [UNKNOWN_SUBJECT_ISSUE, MISSING_CODE_ISSUE]);
        assert!(f.translator.search_by_person(f.patient.uuid).unwrap().is_empty());
    }

    #[test]
    fn test_create_resolves_code_through_external_mapping() {
        let f = fixture();
        let mut input = interop_glucose(&f);
        input.code = Some(
            CodeableConcept::default().with_coding(Coding::external("http://loinc.org", "2345-7")),
        );

        let created = f.translator.create(input).unwrap();
        let created_id = Uuid::parse_str(created.id.as_deref().unwrap()).unwrap();
        let stored = f.registry.observation_by_uuid(created_id).unwrap().unwrap();
        assert_eq!(stored.concept, f.glucose.uuid);
    }

    #[test]
    fn test_update_merges_onto_existing_record() {
        let f = fixture();
        let stored = stored_glucose(&f);
        f.registry.add_observation(stored.clone());

        let mut input = interop_glucose(&f);
        input.value = Some(ObservationValue::ValueQuantity {
            value: 6.1,
            unit: Some("mmol/L".to_string()),
        });

        let updated = f.translator.update(input, stored.uuid).unwrap();
        assert_eq!(updated.id.as_deref(), Some(stored.uuid.to_string().as_str()));

        let merged = f.registry.observation_by_uuid(stored.uuid).unwrap().unwrap();
        assert!(matches!(
            merged.value,
            Some(ObsValue::Numeric { value, .. }) if value == 6.1
        ));
        // Attributes absent from the input survive the merge.
        assert_eq!(merged.encounter, Some(f.encounter.uuid));
    }

    #[test]
    fn test_update_missing_record_creates_with_supplied_id() {
        let f = fixture();
        let id = Uuid::new_v4();

        let created = f.translator.update(interop_glucose(&f), id).unwrap();
        assert_eq!(created.id.as_deref(), Some(id.to_string().as_str()));

        let stored = f.registry.observation_by_uuid(id).unwrap().unwrap();
        assert_eq!(stored.person, f.patient.uuid);
        assert_eq!(stored.concept, f.glucose.uuid);
        assert!(!stored.voided);
    }

    #[test]
    fn test_update_gate_aborts_before_touching_the_record() {
        let f = fixture();
        let stored = stored_glucose(&f);
        f.registry.add_observation(stored.clone());

        let mut input = interop_glucose(&f);
        input.subject = None;

        let err = f.translator.update(input, stored.uuid).unwrap_err();
        assert_eq!(err.issues().unwrap(), [MISSING_SUBJECT_ISSUE]);

        let untouched = f.registry.observation_by_uuid(stored.uuid).unwrap().unwrap();
        assert_eq!(untouched, stored);
    }

    #[test]
    fn test_search_by_date_matches_single_instant() {
        let f = fixture();
        let at = OffsetDateTime::UNIX_EPOCH + time::Duration::hours(12);
        let mut stored = stored_glucose(&f);
        stored.recorded_at = at;
        f.registry.add_observation(stored);
        f.registry.add_observation(stored_glucose(&f));

        assert_eq!(f.translator.search_by_date(at).unwrap().len(), 1);
    }
}
