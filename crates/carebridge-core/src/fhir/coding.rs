//! Codings and codeable concepts.

use serde::{Deserialize, Serialize};

/// A single coding: a code within a terminology system.
///
/// Native codings carry no `system` and use the concept UUID as the code;
/// external codings carry the terminology URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    /// A native coding: the concept UUID, no system URI.
    pub fn native(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            system: None,
            code: code.into(),
            display: Some(display.into()),
        }
    }

    /// A coding in an external terminology identified by URI.
    pub fn external(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: code.into(),
            display: None,
        }
    }
}

/// A concept expressed as one or more codings plus an optional text label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    pub fn with_coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
