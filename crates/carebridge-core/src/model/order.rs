//! Stored clinical orders (medication and procedure requests).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted order record.
///
/// Only the fields the request translator touches are modeled here; dosage,
/// scheduling, and fulfilment stay with the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRequest {
    pub uuid: Uuid,
    pub patient: Uuid,
    /// The ordering clinician, if recorded.
    pub orderer: Option<Uuid>,
    pub encounter: Option<Uuid>,
    /// The care setting the order was placed under.
    pub care_setting: Option<Uuid>,
}

impl StoredRequest {
    pub fn new(uuid: Uuid, patient: Uuid) -> Self {
        Self {
            uuid,
            patient,
            orderer: None,
            encounter: None,
            care_setting: None,
        }
    }

    pub fn with_orderer(mut self, orderer: Uuid) -> Self {
        self.orderer = Some(orderer);
        self
    }

    pub fn with_encounter(mut self, encounter: Uuid) -> Self {
        self.encounter = Some(encounter);
        self
    }

    pub fn with_care_setting(mut self, care_setting: Uuid) -> Self {
        self.care_setting = Some(care_setting);
        self
    }
}
