//! Cross-references between interop resources.
//!
//! Every reference string produced by this layer embeds the native UUID of
//! the target as the suffix after the last `/`. [`extract_uuid`] is the
//! single place that convention is decoded; references whose suffix is not
//! a UUID are simply unresolvable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference from one interop resource to another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Literal reference string, e.g. `Patient/5c1d8a10-…`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Human-readable label for the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Logical identifier of the target, stamped by some builders in
    /// addition to the literal reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Reference {
    /// Builds a reference to `resource_type/uuid`.
    pub fn to(resource_type: &str, uuid: Uuid) -> Self {
        Self {
            reference: Some(format!("{resource_type}/{uuid}")),
            display: None,
            identifier: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Extracts the native UUID embedded in this reference, if any.
    pub fn target_uuid(&self) -> Option<Uuid> {
        self.reference.as_deref().and_then(extract_uuid)
    }
}

/// Extracts the native UUID from a reference string.
///
/// The identifier is the suffix after the last `/`; strings without a
/// separator are treated as a bare identifier. Returns `None` when the
/// suffix does not parse as a UUID.
pub fn extract_uuid(reference: &str) -> Option<Uuid> {
    let suffix = reference.rsplit('/').next()?;
    Uuid::parse_str(suffix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_uuid_from_relative_reference() {
        let id = Uuid::new_v4();
        assert_eq!(extract_uuid(&format!("Patient/{id}")), Some(id));
    }

    #[test]
    fn test_extract_uuid_from_absolute_reference() {
        let id = Uuid::new_v4();
        let reference = format!("http://ehr.example.org/ws/fhir/Encounter/{id}");
        assert_eq!(extract_uuid(&reference), Some(id));
    }

    #[test]
    fn test_extract_uuid_bare_identifier() {
        let id = Uuid::new_v4();
        assert_eq!(extract_uuid(&id.to_string()), Some(id));
    }

    #[test]
    fn test_extract_uuid_rejects_non_uuid_suffix() {
        assert_eq!(extract_uuid("Patient/not-a-uuid"), None);
        assert_eq!(extract_uuid(""), None);
    }

    #[test]
    fn test_reference_round_trip() {
        let id = Uuid::new_v4();
        let reference = Reference::to("Observation", id);
        assert_eq!(reference.target_uuid(), Some(id));
    }

    #[test]
    fn test_reference_serializes_camel_case() {
        let reference = Reference::to("Patient", Uuid::nil()).with_display("Test Patient");
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            json["reference"],
            "Patient/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(json["display"], "Test Patient");
        assert!(json.get("identifier").is_none());
    }
}
