//! The coding-system resolver.
//!
//! Concept selectors name a concept either natively (by UUID) or through an
//! external terminology (mapping code plus system URI). The static
//! URI-to-name map is initialized once and never mutated; the default-system
//! configuration is injected at construction and read-only thereafter.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use uuid::Uuid;

use carebridge_core::fhir::{CodeableConcept, Coding};
use carebridge_core::model::Concept;
use carebridge_registry::{ConceptRegistry, RegistryError};

/// Name of the native coding system: concepts addressed directly by UUID.
pub const NATIVE_CODING_SYSTEM: &str = "native";

static SYSTEM_NAMES_BY_URI: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("http://loinc.org", "LOINC"),
        ("http://snomed.info/sct", "SNOMED CT"),
        ("http://ciel.org", "CIEL"),
        ("http://hl7.org/fhir/sid/icd-10", "ICD-10-WHO"),
    ])
});

/// Maps an external terminology URI to the native coding-system name.
pub fn system_name_for_uri(uri: &str) -> Option<&'static str> {
    SYSTEM_NAMES_BY_URI.get(uri).copied()
}

/// Reverse lookup: the terminology URI for a native coding-system name.
pub fn uri_for_system(name: &str) -> Option<&'static str> {
    SYSTEM_NAMES_BY_URI
        .iter()
        .find(|(_, n)| **n == name)
        .map(|(uri, _)| *uri)
}

/// System-wide coding-system configuration, set once at construction.
#[derive(Debug, Clone, Default)]
pub struct CodingConfig {
    /// The default terminology system consulted when a selector omits an
    /// explicit URI. `None` means native.
    pub default_system: Option<String>,
}

impl CodingConfig {
    pub fn native() -> Self {
        Self::default()
    }

    pub fn with_default_system(name: impl Into<String>) -> Self {
        Self {
            default_system: Some(name.into()),
        }
    }

    /// Whether selectors without a URI resolve through native UUID lookup.
    pub fn is_native_default(&self) -> bool {
        matches!(self.default_system.as_deref(), None | Some(NATIVE_CODING_SYSTEM))
    }
}

/// A native-or-external concept identifier, as accepted by the search entry
/// points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptSelector {
    /// Native concept UUID (as a string) or external mapping code.
    pub code: String,
    /// Terminology URI, absent for native selection.
    pub system_uri: Option<String>,
}

impl ConceptSelector {
    pub fn native(uuid: Uuid) -> Self {
        Self {
            code: uuid.to_string(),
            system_uri: None,
        }
    }

    pub fn external(code: impl Into<String>, system_uri: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            system_uri: Some(system_uri.into()),
        }
    }
}

/// Outcome of resolving one selector.
#[derive(Debug, Clone, PartialEq)]
pub enum ConceptResolution {
    /// The selector named an existing concept.
    Resolved(Concept),
    /// The lookup path was valid but found no concept.
    Unresolved,
    /// The selector required a terminology URI that maps to no known coding
    /// system. Search entry points terminate early on this outcome.
    UnknownSystem(String),
}

/// Resolves concept selectors against the concept registry.
pub struct CodingResolver {
    concepts: Arc<dyn ConceptRegistry>,
    config: CodingConfig,
}

impl CodingResolver {
    pub fn new(concepts: Arc<dyn ConceptRegistry>, config: CodingConfig) -> Self {
        Self { concepts, config }
    }

    /// Resolves one selector.
    ///
    /// No URI: native UUID lookup when the configured default system is
    /// native (or unset), else a URI was required and its absence resolves
    /// as an unknown system. URI present: static map lookup, then mapping
    /// code + mapped system name against the registry.
    pub fn resolve(&self, selector: &ConceptSelector) -> Result<ConceptResolution, RegistryError> {
        let uri = selector.system_uri.as_deref().filter(|u| !u.is_empty());
        match uri {
            None if self.config.is_native_default() => {
                let Ok(uuid) = Uuid::parse_str(&selector.code) else {
                    return Ok(ConceptResolution::Unresolved);
                };
                Ok(match self.concepts.concept_by_uuid(uuid)? {
                    Some(concept) => ConceptResolution::Resolved(concept),
                    None => ConceptResolution::Unresolved,
                })
            }
            None => Ok(ConceptResolution::UnknownSystem(String::new())),
            Some(uri) => match system_name_for_uri(uri) {
                None => Ok(ConceptResolution::UnknownSystem(uri.to_string())),
                Some(system) => Ok(match self.concepts.concept_by_mapping(&selector.code, system)? {
                    Some(concept) => ConceptResolution::Resolved(concept),
                    None => ConceptResolution::Unresolved,
                }),
            },
        }
    }

    /// Resolves a single coding from an incoming resource: native codings
    /// (no system) by UUID, external codings through the static map. An
    /// unknown system yields `None` rather than an early exit here; incoming
    /// codings are tried in order until one resolves.
    pub fn resolve_coding(&self, coding: &Coding) -> Result<Option<Concept>, RegistryError> {
        match coding.system.as_deref() {
            None => match Uuid::parse_str(&coding.code) {
                Ok(uuid) => self.concepts.concept_by_uuid(uuid),
                Err(_) => Ok(None),
            },
            Some(uri) => match system_name_for_uri(uri) {
                Some(system) => self.concepts.concept_by_mapping(&coding.code, system),
                None => Ok(None),
            },
        }
    }

    /// Builds the outgoing codeable concept for a native concept: one native
    /// coding (UUID) plus one external coding per mapping whose system has a
    /// known URI.
    pub fn codeable_concept(&self, concept: &Concept) -> CodeableConcept {
        let mut code = CodeableConcept::default()
            .with_coding(Coding::native(
                concept.uuid.to_string(),
                concept.display_name.clone(),
            ))
            .with_text(concept.display_name.clone());
        for mapping in &concept.mappings {
            if let Some(uri) = uri_for_system(&mapping.system) {
                code = code.with_coding(Coding::external(uri, mapping.code.clone()));
            }
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebridge_registry::MemoryRegistry;

    fn resolver_with(
        concept: Concept,
        config: CodingConfig,
    ) -> (Arc<MemoryRegistry>, CodingResolver) {
        let registry = Arc::new(MemoryRegistry::new());
        registry.add_concept(concept);
        let resolver = CodingResolver::new(registry.clone(), config);
        (registry, resolver)
    }

    fn glucose() -> Concept {
        Concept::new(Uuid::new_v4(), "Serum glucose").with_mapping("2345-7", "LOINC")
    }

    #[test]
    fn test_native_default_resolves_by_uuid() {
        let concept = glucose();
        let uuid = concept.uuid;
        let (_registry, resolver) = resolver_with(concept, CodingConfig::native());

        let resolution = resolver.resolve(&ConceptSelector::native(uuid)).unwrap();
        assert!(matches!(resolution, ConceptResolution::Resolved(c) if c.uuid == uuid));
    }

    #[test]
    fn test_mapped_uri_resolves_by_mapping_code() {
        let concept = glucose();
        let uuid = concept.uuid;
        let (_registry, resolver) = resolver_with(concept, CodingConfig::native());

        let selector = ConceptSelector::external("2345-7", "http://loinc.org");
        let resolution = resolver.resolve(&selector).unwrap();
        assert!(matches!(resolution, ConceptResolution::Resolved(c) if c.uuid == uuid));
    }

    #[test]
    fn test_unmapped_uri_fails_immediately() {
        let (_registry, resolver) = resolver_with(glucose(), CodingConfig::native());

        let selector = ConceptSelector::external("2345-7", "http://example.org/unknown");
        let resolution = resolver.resolve(&selector).unwrap();
        assert_eq!(
            resolution,
            ConceptResolution::UnknownSystem("http://example.org/unknown".to_string())
        );
    }

    #[test]
    fn test_external_default_requires_uri() {
        let (_registry, resolver) =
            resolver_with(glucose(), CodingConfig::with_default_system("LOINC"));

        let selector = ConceptSelector {
            code: Uuid::new_v4().to_string(),
            system_uri: None,
        };
        let resolution = resolver.resolve(&selector).unwrap();
        assert!(matches!(resolution, ConceptResolution::UnknownSystem(_)));
    }

    #[test]
    fn test_native_default_explicitly_named_still_native() {
        let concept = glucose();
        let uuid = concept.uuid;
        let (_registry, resolver) =
            resolver_with(concept, CodingConfig::with_default_system(NATIVE_CODING_SYSTEM));

        let resolution = resolver.resolve(&ConceptSelector::native(uuid)).unwrap();
        assert!(matches!(resolution, ConceptResolution::Resolved(_)));
    }

    #[test]
    fn test_unknown_code_is_unresolved_not_error() {
        let (_registry, resolver) = resolver_with(glucose(), CodingConfig::native());

        let resolution = resolver
            .resolve(&ConceptSelector::native(Uuid::new_v4()))
            .unwrap();
        assert_eq!(resolution, ConceptResolution::Unresolved);

        let resolution = resolver
            .resolve(&ConceptSelector::external("9999-9", "http://loinc.org"))
            .unwrap();
        assert_eq!(resolution, ConceptResolution::Unresolved);
    }

    #[test]
    fn test_codeable_concept_carries_native_and_mapped_codings() {
        let concept = glucose();
        let (_registry, resolver) = resolver_with(concept.clone(), CodingConfig::native());

        let code = resolver.codeable_concept(&concept);
        assert_eq!(code.text.as_deref(), Some("Serum glucose"));
        assert_eq!(code.coding.len(), 2);
        assert_eq!(code.coding[0].code, concept.uuid.to_string());
        assert_eq!(code.coding[0].system, None);
        assert_eq!(code.coding[1].system.as_deref(), Some("http://loinc.org"));
        assert_eq!(code.coding[1].code, "2345-7");
    }

    #[test]
    fn test_uri_map_round_trip() {
        assert_eq!(system_name_for_uri("http://loinc.org"), Some("LOINC"));
        assert_eq!(uri_for_system("LOINC"), Some("http://loinc.org"));
        assert_eq!(system_name_for_uri("http://example.org"), None);
        assert_eq!(uri_for_system("UNKNOWN"), None);
    }
}
