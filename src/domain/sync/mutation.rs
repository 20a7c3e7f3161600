//! Raw device mutations and their validation.

use serde::{Deserialize, Serialize};

use crate::domain::entry::{EnergyScore, EntryDraft, EntryType, MoodScore, StressScore};
use crate::domain::foundation::{
    DomainError, EntryVersion, MobileId, Timestamp, ValidationError,
};

/// One unvalidated entry mutation as submitted by a device.
///
/// Everything is raw wire data; `validate` turns it into domain values
/// or a per-item rejection that leaves the rest of the batch untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMutation {
    /// Client-generated stable id, unique per (owner, device entry).
    pub mobile_id: String,
    pub entry_type: String,
    pub occurred_at: Timestamp,
    pub content: String,
    pub mood: Option<u8>,
    pub stress: Option<u8>,
    pub energy: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Version the device believes it is writing.
    pub version: u32,
    #[serde(default)]
    pub deleted: bool,
}

/// A mutation whose fields all passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMutation {
    pub mobile_id: MobileId,
    pub claimed_version: EntryVersion,
    pub draft: EntryDraft,
}

impl EntryMutation {
    /// Validates every field, collapsing the first failure into a
    /// `DomainError` for the per-item rejection outcome.
    pub fn validate(&self) -> Result<ValidatedMutation, DomainError> {
        let mobile_id = MobileId::new(self.mobile_id.clone())?;

        let entry_type = EntryType::parse(&self.entry_type).ok_or_else(|| {
            ValidationError::invalid_format("entry_type", self.entry_type.as_str())
        })?;

        let claimed_version = EntryVersion::from_u32(self.version).map_err(|_| {
            ValidationError::out_of_range("version", 1, i32::MAX, self.version as i32)
        })?;

        let mood = self.mood.map(MoodScore::new).transpose()?;
        let stress = self.stress.map(StressScore::new).transpose()?;
        let energy = self.energy.map(EnergyScore::new).transpose()?;

        let mut draft = EntryDraft::new(
            entry_type,
            self.occurred_at,
            self.content.clone(),
            mood,
            stress,
            energy,
            self.tags.clone(),
            self.triggers.clone(),
        )?;
        if self.deleted {
            draft = draft.deleted();
        }

        Ok(ValidatedMutation {
            mobile_id,
            claimed_version,
            draft,
        })
    }
}

/// An ordered batch of mutations from one device sync call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncBatch {
    pub mutations: Vec<EntryMutation>,
}

impl SyncBatch {
    pub fn new(mutations: Vec<EntryMutation>) -> Self {
        Self { mutations }
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn raw_mutation() -> EntryMutation {
        EntryMutation {
            mobile_id: "device-a:42".to_string(),
            entry_type: "journal".to_string(),
            occurred_at: Timestamp::from_unix_secs(1_705_276_800),
            content: "walked by the river, head feels clearer".to_string(),
            mood: Some(6),
            stress: Some(2),
            energy: Some(7),
            tags: vec!["walk".to_string()],
            triggers: vec![],
            version: 1,
            deleted: false,
        }
    }

    #[test]
    fn valid_mutation_produces_a_draft() {
        let validated = raw_mutation().validate().unwrap();
        assert_eq!(validated.mobile_id.as_str(), "device-a:42");
        assert_eq!(validated.claimed_version, EntryVersion::initial());
        assert_eq!(validated.draft.entry_type, EntryType::Journal);
        assert!(!validated.draft.deleted);
    }

    #[test]
    fn unknown_entry_type_is_rejected() {
        let mut raw = raw_mutation();
        raw.entry_type = "horoscope".to_string();

        let err = raw.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn out_of_range_mood_is_rejected() {
        let mut raw = raw_mutation();
        raw.mood = Some(11);
        assert!(raw.validate().is_err());
    }

    #[test]
    fn zero_version_is_rejected() {
        let mut raw = raw_mutation();
        raw.version = 0;
        assert!(raw.validate().is_err());
    }

    #[test]
    fn deleted_flag_carries_into_the_draft() {
        let mut raw = raw_mutation();
        raw.deleted = true;
        assert!(raw.validate().unwrap().draft.deleted);
    }

    #[test]
    fn mutation_deserializes_with_defaults() {
        let json = r#"{
            "mobile_id": "device-b:7",
            "entry_type": "mood_checkin",
            "occurred_at": "2024-01-15T00:00:00Z",
            "content": "quick check-in",
            "mood": 5,
            "stress": null,
            "energy": null,
            "version": 1
        }"#;

        let raw: EntryMutation = serde_json::from_str(json).unwrap();
        assert!(raw.tags.is_empty());
        assert!(!raw.deleted);
        assert!(raw.validate().is_ok());
    }
}
