//! The reference resolver.
//!
//! Every interop cross-reference embeds the target's native UUID as the
//! suffix after the last `/`. Resolution extracts that UUID and looks the
//! target up in the appropriate registry; anything that does not parse or
//! does not exist resolves to `None`.

use carebridge_core::fhir::Reference;
use carebridge_core::model::{Encounter, Patient, Provider};
use carebridge_registry::{
    EncounterRegistry, PatientRegistry, ProviderRegistry, Result as RegistryResult,
};

/// Resolves a patient from a subject reference.
pub fn resolve_patient(
    patients: &dyn PatientRegistry,
    reference: &Reference,
) -> RegistryResult<Option<Patient>> {
    match reference.target_uuid() {
        Some(uuid) => patients.patient_by_uuid(uuid),
        None => Ok(None),
    }
}

/// Resolves an encounter from a context reference.
pub fn resolve_encounter(
    encounters: &dyn EncounterRegistry,
    reference: &Reference,
) -> RegistryResult<Option<Encounter>> {
    match reference.target_uuid() {
        Some(uuid) => encounters.encounter_by_uuid(uuid),
        None => Ok(None),
    }
}

/// Resolves a provider from a requester agent reference.
pub fn resolve_provider(
    providers: &dyn ProviderRegistry,
    reference: &Reference,
) -> RegistryResult<Option<Provider>> {
    match reference.target_uuid() {
        Some(uuid) => providers.provider_by_uuid(uuid),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebridge_registry::MemoryRegistry;
    use uuid::Uuid;

    #[test]
    fn test_resolve_patient_by_reference() {
        let registry = MemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.add_patient(Patient::new(id, "MRN-1", "Ada Example"));

        let reference = Reference::to("Patient", id);
        let found = resolve_patient(&registry, &reference).unwrap();
        assert_eq!(found.unwrap().uuid, id);
    }

    #[test]
    fn test_unparseable_reference_resolves_to_none() {
        let registry = MemoryRegistry::new();
        let reference = Reference {
            reference: Some("Patient/not-a-uuid".to_string()),
            ..Default::default()
        };
        assert!(resolve_patient(&registry, &reference).unwrap().is_none());

        let empty = Reference::default();
        assert!(resolve_encounter(&registry, &empty).unwrap().is_none());
    }

    #[test]
    fn test_unknown_target_resolves_to_none() {
        let registry = MemoryRegistry::new();
        let reference = Reference::to("Practitioner", Uuid::new_v4());
        assert!(resolve_provider(&registry, &reference).unwrap().is_none());
    }
}
