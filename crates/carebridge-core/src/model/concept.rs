//! Clinical concepts and their external terminology mappings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mapping from a concept to a code in an external terminology.
///
/// `system` is the native name of the coding system (e.g. `"LOINC"`), not
/// its URI; the URI ↔ name translation lives with the coding-system
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapping {
    pub code: String,
    pub system: String,
}

impl ConceptMapping {
    pub fn new(code: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            system: system.into(),
        }
    }
}

/// A concept from the native dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uuid: Uuid,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ConceptMapping>,
}

impl Concept {
    pub fn new(uuid: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            mappings: Vec::new(),
        }
    }

    pub fn with_mapping(mut self, code: impl Into<String>, system: impl Into<String>) -> Self {
        self.mappings.push(ConceptMapping::new(code, system));
        self
    }

    /// Returns the mapping code for the given system name, if any.
    pub fn mapping_for(&self, system: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.system == system)
            .map(|m| m.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_for() {
        let concept = Concept::new(Uuid::new_v4(), "Serum glucose")
            .with_mapping("2345-7", "LOINC")
            .with_mapping("271062006", "SNOMED CT");

        assert_eq!(concept.mapping_for("LOINC"), Some("2345-7"));
        assert_eq!(concept.mapping_for("SNOMED CT"), Some("271062006"));
        assert_eq!(concept.mapping_for("ICD-10-WHO"), None);
    }
}
