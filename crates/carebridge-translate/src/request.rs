//! The request translator.
//!
//! Converts stored orders to and from the two interoperable request kinds
//! (MedicationRequest and ProcedureRequest). Forward builders resolve the
//! subject, the ordering clinician, and the care-setting classification;
//! reverse builders produce the references and the care-setting extension
//! for a stored order.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use carebridge_core::fhir::{
    CARE_SETTING_EXTENSION_URL, Extension, InteropResource, Reference, RequestResource,
};
use carebridge_core::model::{CareSetting, CareSettingKind, Patient, Provider, StoredRequest};
use carebridge_registry::{CareSettingRegistry, PatientRegistry, ProviderRegistry};

use crate::error::Result;
use crate::issues::Issues;
use crate::refs;

const REQUEST_KIND_ISSUE: &str = "resource must be a MedicationRequest or a ProcedureRequest";
const EMPTY_REQUESTER_ISSUE: &str = "requester cannot be empty";
const EMPTY_SUBJECT_ISSUE: &str = "subject cannot be empty";
const UNKNOWN_PATIENT_ISSUE: &str = "no patient found for the subject reference";

/// Translates stored orders to and from interop request resources.
pub struct RequestTranslator {
    patients: Arc<dyn PatientRegistry>,
    providers: Arc<dyn ProviderRegistry>,
    care_settings: Arc<dyn CareSettingRegistry>,
}

impl RequestTranslator {
    pub fn new(
        patients: Arc<dyn PatientRegistry>,
        providers: Arc<dyn ProviderRegistry>,
        care_settings: Arc<dyn CareSettingRegistry>,
    ) -> Self {
        Self {
            patients,
            providers,
            care_settings,
        }
    }

    /// Shared precondition of the forward builders: the resource must be one
    /// of the two request kinds. Violations append one fixed issue and
    /// short-circuit the builder without any lookup.
    fn require_request<'a>(
        resource: &'a InteropResource,
        issues: &mut Issues,
    ) -> Option<&'a dyn RequestResource> {
        let request = resource.as_request();
        if request.is_none() {
            issues.push(REQUEST_KIND_ISSUE);
        }
        request
    }

    /// Resolves the care setting for a request: the care-setting extension
    /// when present and resolvable, else the fixed default classification
    /// (inpatient).
    pub fn build_care_setting(
        &self,
        resource: &InteropResource,
        issues: &mut Issues,
    ) -> Result<Option<CareSetting>> {
        let Some(request) = Self::require_request(resource, issues) else {
            return Ok(None);
        };

        if let Some(extension) =
            Extension::find_by_url(request.extensions(), CARE_SETTING_EXTENSION_URL)
        {
            let target = extension
                .value_string
                .as_deref()
                .and_then(|value| Uuid::parse_str(value).ok());
            if let Some(uuid) = target {
                if let Some(care_setting) = self.care_settings.care_setting_by_uuid(uuid)? {
                    return Ok(Some(care_setting));
                }
            }
            debug!("care-setting extension did not resolve; using the default");
        }

        Ok(self
            .care_settings
            .care_setting_by_kind(CareSettingKind::default_for_requests())?)
    }

    /// Resolves the subject patient of a request. An absent subject
    /// reference or a failed lookup appends an issue and returns `None`;
    /// the caller decides whether to abort.
    pub fn build_patient(
        &self,
        resource: &InteropResource,
        issues: &mut Issues,
    ) -> Result<Option<Patient>> {
        let Some(request) = Self::require_request(resource, issues) else {
            return Ok(None);
        };

        match request.subject_reference() {
            Some(subject) => {
                let patient = refs::resolve_patient(self.patients.as_ref(), subject)?;
                if patient.is_none() {
                    issues.push(UNKNOWN_PATIENT_ISSUE);
                }
                Ok(patient)
            }
            None => {
                issues.push(EMPTY_SUBJECT_ISSUE);
                Ok(None)
            }
        }
    }

    /// Resolves the ordering clinician from the requester sub-element. A
    /// missing requester appends an issue and returns `None`.
    pub fn build_orderer(
        &self,
        resource: &InteropResource,
        issues: &mut Issues,
    ) -> Result<Option<Provider>> {
        let Some(request) = Self::require_request(resource, issues) else {
            return Ok(None);
        };

        let Some(agent) = request.requester_agent_reference() else {
            issues.push(EMPTY_REQUESTER_ISSUE);
            return Ok(None);
        };
        Ok(refs::resolve_provider(self.providers.as_ref(), agent)?)
    }

    /// Builds the subject reference for a stored order, with the patient's
    /// display name when the patient resolves.
    pub fn build_subject(&self, order: &StoredRequest) -> Result<Reference> {
        let mut reference = Reference::to("Patient", order.patient);
        if let Some(patient) = self.patients.patient_by_uuid(order.patient)? {
            reference = reference.with_display(patient.display_name);
        }
        Ok(reference)
    }

    /// Builds the practitioner reference for a stored order, or `None` when
    /// the order has no orderer.
    pub fn build_practitioner_reference(&self, order: &StoredRequest) -> Result<Option<Reference>> {
        let Some(orderer) = order.orderer else {
            return Ok(None);
        };
        let mut reference = Reference::to("Practitioner", orderer);
        if let Some(provider) = self.providers.provider_by_uuid(orderer)? {
            reference = reference.with_display(provider.display_name);
        }
        Ok(Some(reference))
    }

    /// Builds the encounter reference for a stored order, stamping the
    /// reference's identifier field with the encounter UUID. `None` when
    /// the order has no encounter.
    pub fn build_context(&self, order: &StoredRequest) -> Option<Reference> {
        order.encounter.map(|encounter| {
            Reference::to("Encounter", encounter).with_identifier(encounter.to_string())
        })
    }

    /// Builds the care-setting extension for a stored order, or `None` when
    /// the order carries no care setting.
    pub fn build_care_setting_extension(&self, order: &StoredRequest) -> Option<Extension> {
        order.care_setting.map(Extension::care_setting)
    }
}
