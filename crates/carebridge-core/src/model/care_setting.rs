//! Care settings: the enumerated clinical context an order belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed classification of a care setting.
///
/// The numeric codes are part of the persistence contract and must not be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareSettingKind {
    Outpatient,
    Inpatient,
}

impl CareSettingKind {
    /// The fixed numeric classification code.
    pub fn code(self) -> u8 {
        match self {
            Self::Outpatient => 1,
            Self::Inpatient => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Outpatient),
            2 => Some(Self::Inpatient),
            _ => None,
        }
    }

    /// The classification used whenever a request carries no resolvable
    /// care-setting extension.
    pub fn default_for_requests() -> Self {
        Self::Inpatient
    }
}

/// A care setting as registered with the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareSetting {
    pub uuid: Uuid,
    pub name: String,
    pub kind: CareSettingKind,
}

impl CareSetting {
    pub fn new(uuid: Uuid, name: impl Into<String>, kind: CareSettingKind) -> Self {
        Self {
            uuid,
            name: name.into(),
            kind,
        }
    }
}
