//! Stored observations: measurements and findings recorded against a
//! person.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The recorded value of an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObsValue {
    /// A numeric result, optionally carrying a unit.
    Numeric { value: f64, unit: Option<String> },
    /// Free-text result.
    Text(String),
    /// A coded result: the UUID of the answer concept.
    Coded(Uuid),
}

/// A persisted observation record.
///
/// Group membership is kept as a set of member UUIDs rather than owned child
/// records: duplicates collapse, order is not preserved, and the persistence
/// layer stays free to arena- or index-store the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObservation {
    pub uuid: Uuid,
    /// The person the observation was recorded for.
    pub person: Uuid,
    /// The encounter the observation was captured in, if any.
    pub encounter: Option<Uuid>,
    /// The question concept.
    pub concept: Uuid,
    pub value: Option<ObsValue>,
    /// The instant the observation was recorded.
    pub recorded_at: OffsetDateTime,
    pub voided: bool,
    pub void_reason: Option<String>,
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub group_members: HashSet<Uuid>,
}

impl StoredObservation {
    pub fn new(uuid: Uuid, person: Uuid, concept: Uuid, recorded_at: OffsetDateTime) -> Self {
        Self {
            uuid,
            person,
            encounter: None,
            concept,
            value: None,
            recorded_at,
            voided: false,
            void_reason: None,
            group_members: HashSet::new(),
        }
    }

    pub fn with_encounter(mut self, encounter: Uuid) -> Self {
        self.encounter = Some(encounter);
        self
    }

    pub fn with_value(mut self, value: ObsValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Adds a group member by back-reference. Duplicates collapse.
    pub fn add_group_member(&mut self, member: Uuid) {
        self.group_members.insert(member);
    }

    /// Marks the record voided. Voided records are excluded from every
    /// fetch and search path.
    pub fn void(&mut self, reason: impl Into<String>) {
        self.voided = true;
        self.void_reason = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StoredObservation {
        StoredObservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_group_members_collapse_duplicates() {
        let mut obs = sample();
        let member = Uuid::new_v4();
        obs.add_group_member(member);
        obs.add_group_member(member);
        assert_eq!(obs.group_members.len(), 1);
    }

    #[test]
    fn test_void_records_reason() {
        let mut obs = sample();
        obs.void("bad entry");
        assert!(obs.voided);
        assert_eq!(obs.void_reason.as_deref(), Some("bad entry"));
    }
}
