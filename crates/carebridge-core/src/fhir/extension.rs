//! URL-keyed extensions on interop resources.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extension URL carrying the care-setting UUID on request resources.
pub const CARE_SETTING_EXTENSION_URL: &str =
    "https://fhir.carebridge.dev/StructureDefinition/care-setting";

/// An extension entry keyed by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

impl Extension {
    pub fn new(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value_string: Some(value.into()),
        }
    }

    /// Builds the care-setting extension for the given care-setting UUID.
    pub fn care_setting(uuid: Uuid) -> Self {
        Self::new(CARE_SETTING_EXTENSION_URL, uuid.to_string())
    }

    /// Returns the first extension in `extensions` with the given URL.
    pub fn find_by_url<'a>(extensions: &'a [Extension], url: &str) -> Option<&'a Extension> {
        extensions.iter().find(|e| e.url == url)
    }
}
