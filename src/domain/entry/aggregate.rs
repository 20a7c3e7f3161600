//! Entry aggregate root.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DomainError, EntryId, EntryVersion, ErrorCode, MobileId, TenantId, Timestamp, UserId,
    ValidationError,
};

use super::{EnergyScore, MoodScore, StressScore, SyncStatus};

/// Kind of wellbeing entry a user logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Free-form journal entry.
    Journal,
    /// Quick structured mood/stress/energy check-in.
    MoodCheckin,
    /// Gratitude note.
    Gratitude,
    /// Goal or intention tracking.
    Goal,
    /// User flagged a safety concern; weighs into urgency scoring.
    SafetyConcern,
}

impl EntryType {
    /// Parses a type from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "journal" => Some(Self::Journal),
            "mood_checkin" => Some(Self::MoodCheckin),
            "gratitude" => Some(Self::Gratitude),
            "goal" => Some(Self::Goal),
            "safety_concern" => Some(Self::SafetyConcern),
            _ => None,
        }
    }

    /// Returns the wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::MoodCheckin => "mood_checkin",
            Self::Gratitude => "gratitude",
            Self::Goal => "goal",
            Self::SafetyConcern => "safety_concern",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated field payload for creating or updating an entry.
///
/// Built from a raw device mutation after per-field validation; by the
/// time a draft exists, every score is in range.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub entry_type: EntryType,
    pub occurred_at: Timestamp,
    pub content: String,
    pub mood: Option<MoodScore>,
    pub stress: Option<StressScore>,
    pub energy: Option<EnergyScore>,
    pub tags: Vec<String>,
    pub triggers: Vec<String>,
    pub deleted: bool,
}

impl EntryDraft {
    /// Creates a draft, rejecting empty content.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entry_type: EntryType,
        occurred_at: Timestamp,
        content: String,
        mood: Option<MoodScore>,
        stress: Option<StressScore>,
        energy: Option<EnergyScore>,
        tags: Vec<String>,
        triggers: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            entry_type,
            occurred_at,
            content,
            mood,
            stress,
            energy,
            tags,
            triggers,
            deleted: false,
        })
    }

    /// Marks the draft as a soft-delete request.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Wellbeing entry aggregate root.
///
/// Created by a device (via sync) or a server API call, mutated only
/// through version-checked updates, and soft-deleted; the pipeline never
/// hard-deletes entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: EntryId,
    owner: UserId,
    tenant: TenantId,
    mobile_id: MobileId,
    entry_type: EntryType,
    occurred_at: Timestamp,
    content: String,
    mood: Option<MoodScore>,
    stress: Option<StressScore>,
    energy: Option<EnergyScore>,
    tags: Vec<String>,
    triggers: Vec<String>,
    version: EntryVersion,
    sync_status: SyncStatus,
    deleted: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Entry {
    /// Creates a new entry at version 1 with status `Synced`.
    pub fn create(
        owner: UserId,
        tenant: TenantId,
        mobile_id: MobileId,
        draft: EntryDraft,
        now: Timestamp,
    ) -> Self {
        Self {
            id: EntryId::new(),
            owner,
            tenant,
            mobile_id,
            entry_type: draft.entry_type,
            occurred_at: draft.occurred_at,
            content: draft.content,
            mood: draft.mood,
            stress: draft.stress,
            energy: draft.energy,
            tags: draft.tags,
            triggers: draft.triggers,
            version: EntryVersion::initial(),
            sync_status: SyncStatus::Synced,
            deleted: draft.deleted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds an entry from persisted state. Adapter use only.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: EntryId,
        owner: UserId,
        tenant: TenantId,
        mobile_id: MobileId,
        entry_type: EntryType,
        occurred_at: Timestamp,
        content: String,
        mood: Option<MoodScore>,
        stress: Option<StressScore>,
        energy: Option<EnergyScore>,
        tags: Vec<String>,
        triggers: Vec<String>,
        version: EntryVersion,
        sync_status: SyncStatus,
        deleted: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            tenant,
            mobile_id,
            entry_type,
            occurred_at,
            content,
            mood,
            stress,
            energy,
            tags,
            triggers,
            version,
            sync_status,
            deleted,
            created_at,
            updated_at,
        }
    }

    // Getters
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn tenant(&self) -> TenantId {
        self.tenant
    }

    pub fn mobile_id(&self) -> &MobileId {
        &self.mobile_id
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mood(&self) -> Option<MoodScore> {
        self.mood
    }

    pub fn stress(&self) -> Option<StressScore> {
        self.stress
    }

    pub fn energy(&self) -> Option<EnergyScore> {
        self.energy
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn version(&self) -> EntryVersion {
        self.version
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Applies a version-checked update from a device.
    ///
    /// The claimed version must strictly exceed the stored version; the
    /// stored version then advances to `max(stored + 1, claimed)`. A
    /// non-increasing claim leaves the aggregate untouched and returns a
    /// `VersionConflict` error for the sync layer to report as data.
    pub fn apply_update(
        &mut self,
        draft: EntryDraft,
        claimed: EntryVersion,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !self.version.accepts(claimed) {
            return Err(DomainError::new(
                ErrorCode::VersionConflict,
                format!(
                    "Claimed version {} does not exceed stored version {}",
                    claimed, self.version
                ),
            )
            .with_detail("stored_version", self.version.to_string())
            .with_detail("claimed_version", claimed.to_string()));
        }

        self.entry_type = draft.entry_type;
        self.occurred_at = draft.occurred_at;
        self.content = draft.content;
        self.mood = draft.mood;
        self.stress = draft.stress;
        self.energy = draft.energy;
        self.tags = draft.tags;
        self.triggers = draft.triggers;
        self.deleted = draft.deleted;
        self.version = self.version.advance(claimed);
        self.sync_status = SyncStatus::Synced;
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes the entry, advancing the version.
    pub fn mark_deleted(&mut self, claimed: EntryVersion, now: Timestamp) -> Result<(), DomainError> {
        let draft = EntryDraft {
            entry_type: self.entry_type,
            occurred_at: self.occurred_at,
            content: self.content.clone(),
            mood: self.mood,
            stress: self.stress,
            energy: self.energy,
            tags: self.tags.clone(),
            triggers: self.triggers.clone(),
            deleted: true,
        };
        self.apply_update(draft, claimed, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_owner() -> UserId {
        UserId::new("user-1".to_string()).unwrap()
    }

    fn test_mobile_id() -> MobileId {
        MobileId::new("device-a:1".to_string()).unwrap()
    }

    fn test_draft(content: &str) -> EntryDraft {
        EntryDraft::new(
            EntryType::Journal,
            Timestamp::from_unix_secs(1_705_276_800),
            content.to_string(),
            Some(MoodScore::new(5).unwrap()),
            Some(StressScore::new(2).unwrap()),
            Some(EnergyScore::new(6).unwrap()),
            vec!["morning".to_string()],
            vec![],
        )
        .unwrap()
    }

    fn test_entry() -> Entry {
        Entry::create(
            test_owner(),
            TenantId::new(),
            test_mobile_id(),
            test_draft("slept well, feeling steady"),
            Timestamp::from_unix_secs(1_705_276_800),
        )
    }

    #[test]
    fn draft_rejects_empty_content() {
        let result = EntryDraft::new(
            EntryType::Journal,
            Timestamp::from_unix_secs(0),
            "   ".to_string(),
            None,
            None,
            None,
            vec![],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_starts_at_version_one_synced() {
        let entry = test_entry();
        assert_eq!(entry.version(), EntryVersion::initial());
        assert_eq!(entry.sync_status(), SyncStatus::Synced);
        assert!(!entry.is_deleted());
    }

    #[test]
    fn apply_update_with_higher_claim_advances_version() {
        let mut entry = test_entry();
        let now = Timestamp::from_unix_secs(1_705_363_200);

        entry
            .apply_update(test_draft("updated text"), EntryVersion::from_u32(2).unwrap(), now)
            .unwrap();

        assert_eq!(entry.version().as_u32(), 2);
        assert_eq!(entry.content(), "updated text");
        assert_eq!(entry.updated_at(), now);
    }

    #[test]
    fn apply_update_keeps_claimed_version_when_device_jumped_ahead() {
        let mut entry = test_entry();

        entry
            .apply_update(
                test_draft("jumped"),
                EntryVersion::from_u32(5).unwrap(),
                Timestamp::from_unix_secs(1_705_363_200),
            )
            .unwrap();

        assert_eq!(entry.version().as_u32(), 5);
    }

    #[test]
    fn apply_update_rejects_stale_claim_without_mutation() {
        let mut entry = test_entry();
        let before = entry.clone();

        let err = entry
            .apply_update(
                test_draft("stale"),
                EntryVersion::from_u32(1).unwrap(),
                Timestamp::from_unix_secs(1_705_363_200),
            )
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::VersionConflict);
        assert_eq!(err.details.get("stored_version"), Some(&"1".to_string()));
        assert_eq!(err.details.get("claimed_version"), Some(&"1".to_string()));
        assert_eq!(entry, before, "rejected update must not mutate the entry");
    }

    #[test]
    fn versions_strictly_increase_across_accepted_updates() {
        let mut entry = test_entry();
        let mut last = entry.version();

        for claim in [2u32, 3, 9, 10] {
            entry
                .apply_update(
                    test_draft("next"),
                    EntryVersion::from_u32(claim).unwrap(),
                    Timestamp::from_unix_secs(1_705_363_200),
                )
                .unwrap();
            assert!(entry.version() > last);
            last = entry.version();
        }
    }

    #[test]
    fn mark_deleted_is_soft() {
        let mut entry = test_entry();

        entry
            .mark_deleted(
                EntryVersion::from_u32(2).unwrap(),
                Timestamp::from_unix_secs(1_705_363_200),
            )
            .unwrap();

        assert!(entry.is_deleted());
        assert_eq!(entry.version().as_u32(), 2);
        // Content survives a soft delete.
        assert!(!entry.content().is_empty());
    }

    #[test]
    fn entry_type_roundtrips_through_strings() {
        for ty in [
            EntryType::Journal,
            EntryType::MoodCheckin,
            EntryType::Gratitude,
            EntryType::Goal,
            EntryType::SafetyConcern,
        ] {
            assert_eq!(EntryType::parse(ty.as_str()), Some(ty));
        }
    }
}
