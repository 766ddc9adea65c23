//! The interoperable request resources (MedicationRequest and
//! ProcedureRequest) and the capability seam the request translator works
//! against.
//!
//! The two request kinds share a requester concept with different shapes;
//! [`RequestResource`] exposes the accessors the translator needs once per
//! kind instead of inspecting the concrete type at every call site.

use serde::{Deserialize, Serialize};

use super::extension::Extension;
use super::observation::InteropObservation;
use super::reference::Reference;

/// The requester sub-element of a MedicationRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequester {
    pub agent: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,
}

/// The requester sub-element of a ProcedureRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureRequester {
    pub agent: Reference,
}

/// An interoperable medication order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<MedicationRequester>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

/// An interoperable procedure order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<ProcedureRequester>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

/// Accessors shared by the two request kinds.
pub trait RequestResource {
    fn subject_reference(&self) -> Option<&Reference>;
    /// The agent reference of the requester sub-element, `None` when the
    /// requester is absent.
    fn requester_agent_reference(&self) -> Option<&Reference>;
    fn extensions(&self) -> &[Extension];
}

impl RequestResource for MedicationRequest {
    fn subject_reference(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    fn requester_agent_reference(&self) -> Option<&Reference> {
        self.requester.as_ref().map(|r| &r.agent)
    }

    fn extensions(&self) -> &[Extension] {
        &self.extension
    }
}

impl RequestResource for ProcedureRequest {
    fn subject_reference(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    fn requester_agent_reference(&self) -> Option<&Reference> {
        self.requester.as_ref().map(|r| &r.agent)
    }

    fn extensions(&self) -> &[Extension] {
        &self.extension
    }
}

/// Any interop resource this layer understands.
///
/// The request translator only processes the two request kinds; every other
/// variant is an unsupported resource kind at its seam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum InteropResource {
    Observation(InteropObservation),
    MedicationRequest(MedicationRequest),
    ProcedureRequest(ProcedureRequest),
}

impl InteropResource {
    /// Views this resource as a request, when it is one of the two request
    /// kinds.
    pub fn as_request(&self) -> Option<&dyn RequestResource> {
        match self {
            Self::MedicationRequest(r) => Some(r),
            Self::ProcedureRequest(r) => Some(r),
            Self::Observation(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Observation(_) => "Observation",
            Self::MedicationRequest(_) => "MedicationRequest",
            Self::ProcedureRequest(_) => "ProcedureRequest",
        }
    }
}
