//! The interoperable Observation resource shape.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::coding::CodeableConcept;
use super::reference::Reference;

/// Status of an observation resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    #[default]
    Final,
    Preliminary,
    Amended,
    EnteredInError,
}

/// How a related observation relates to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    #[default]
    HasMember,
    DerivedFrom,
}

/// A "related" entry: a typed link to another observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRelated {
    #[serde(rename = "type", default)]
    pub kind: RelationKind,
    pub target: Reference,
}

impl ObservationRelated {
    pub fn has_member(target: Reference) -> Self {
        Self {
            kind: RelationKind::HasMember,
            target,
        }
    }
}

/// The recorded value, in interop shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObservationValue {
    ValueQuantity { value: f64, unit: Option<String> },
    ValueString(String),
    ValueCodeableConcept(CodeableConcept),
}

/// The interoperable representation of a stored observation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteropObservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: ObservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    /// The encounter the observation was captured in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub effective_date_time: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub value: Option<ObservationValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<ObservationRelated>,
}
