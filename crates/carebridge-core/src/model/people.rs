//! Patients, encounters, and providers as the translation core sees them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub uuid: Uuid,
    /// Business identifier (medical record number or similar), distinct from
    /// the native UUID.
    pub identifier: String,
    pub display_name: String,
}

impl Patient {
    pub fn new(uuid: Uuid, identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uuid,
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

/// A visit/encounter a record can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub uuid: Uuid,
    pub patient: Uuid,
}

impl Encounter {
    pub fn new(uuid: Uuid, patient: Uuid) -> Self {
        Self { uuid, patient }
    }
}

/// An ordering clinician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub uuid: Uuid,
    pub identifier: String,
    pub display_name: String,
}

impl Provider {
    pub fn new(uuid: Uuid, identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uuid,
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}
