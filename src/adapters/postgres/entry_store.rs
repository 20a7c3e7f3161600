//! PostgreSQL implementation of EntryStore.
//!
//! The compare-and-set discipline lives in the SQL: updates are
//! conditional on the stored version, and creates rely on the unique
//! (owner_id, mobile_id) constraint. Losing either race re-reads the
//! stored row and reports it as a conflict outcome.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::entry::{EnergyScore, Entry, EntryType, MoodScore, StressScore, SyncStatus};
use crate::domain::foundation::{
    DomainError, EntryId, EntryVersion, ErrorCode, MobileId, TenantId, Timestamp, UserId,
};
use crate::ports::{EntryStore, PutOutcome};

/// PostgreSQL implementation of EntryStore.
#[derive(Clone)]
pub struct PostgresEntryStore {
    pool: PgPool,
}

impl PostgresEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM wellbeing_entries WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch entry"))?;

        row.map(row_to_entry).transpose()
    }
}

const ENTRY_COLUMNS: &str = "id, owner_id, tenant_id, mobile_id, entry_type, occurred_at, \
     content, mood, stress, energy, tags, triggers, version, sync_status, deleted, \
     created_at, updated_at";

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn get(&self, id: EntryId) -> Result<Option<Entry>, DomainError> {
        self.fetch_by_id(id).await
    }

    async fn get_by_mobile_id(
        &self,
        owner: &UserId,
        mobile_id: &MobileId,
    ) -> Result<Option<Entry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM wellbeing_entries \
             WHERE owner_id = $1 AND mobile_id = $2"
        ))
        .bind(owner.as_str())
        .bind(mobile_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch entry by mobile id"))?;

        row.map(row_to_entry).transpose()
    }

    async fn put(
        &self,
        entry: Entry,
        expected_version: Option<EntryVersion>,
    ) -> Result<PutOutcome, DomainError> {
        match expected_version {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO wellbeing_entries (
                        id, owner_id, tenant_id, mobile_id, entry_type, occurred_at,
                        content, mood, stress, energy, tags, triggers, version,
                        sync_status, deleted, created_at, updated_at
                    ) VALUES (
                        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                        $14, $15, $16, $17
                    )
                    ON CONFLICT (owner_id, mobile_id) DO NOTHING
                    "#,
                )
                .bind(entry.id().as_uuid())
                .bind(entry.owner().as_str())
                .bind(entry.tenant().as_uuid())
                .bind(entry.mobile_id().as_str())
                .bind(entry.entry_type().as_str())
                .bind(entry.occurred_at().as_datetime())
                .bind(entry.content())
                .bind(entry.mood().map(|m| m.as_u8() as i16))
                .bind(entry.stress().map(|s| s.as_u8() as i16))
                .bind(entry.energy().map(|e| e.as_u8() as i16))
                .bind(entry.tags())
                .bind(entry.triggers())
                .bind(entry.version().as_u32() as i32)
                .bind(entry.sync_status().as_str())
                .bind(entry.is_deleted())
                .bind(entry.created_at().as_datetime())
                .bind(entry.updated_at().as_datetime())
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to insert entry"))?;

                if result.rows_affected() == 1 {
                    return Ok(PutOutcome::Stored);
                }

                // Another device created the same mobile_id first.
                let stored = self
                    .get_by_mobile_id(entry.owner(), entry.mobile_id())
                    .await?
                    .ok_or_else(|| {
                        DomainError::new(
                            ErrorCode::InvariantViolation,
                            "Insert conflicted but no stored row was found",
                        )
                    })?;
                Ok(PutOutcome::Conflict {
                    stored: Box::new(stored),
                })
            }
            Some(expected) => {
                let result = sqlx::query(
                    r#"
                    UPDATE wellbeing_entries SET
                        entry_type = $3, occurred_at = $4, content = $5,
                        mood = $6, stress = $7, energy = $8, tags = $9,
                        triggers = $10, version = $11, sync_status = $12,
                        deleted = $13, updated_at = $14
                    WHERE id = $1 AND version = $2
                    "#,
                )
                .bind(entry.id().as_uuid())
                .bind(expected.as_u32() as i32)
                .bind(entry.entry_type().as_str())
                .bind(entry.occurred_at().as_datetime())
                .bind(entry.content())
                .bind(entry.mood().map(|m| m.as_u8() as i16))
                .bind(entry.stress().map(|s| s.as_u8() as i16))
                .bind(entry.energy().map(|e| e.as_u8() as i16))
                .bind(entry.tags())
                .bind(entry.triggers())
                .bind(entry.version().as_u32() as i32)
                .bind(entry.sync_status().as_str())
                .bind(entry.is_deleted())
                .bind(entry.updated_at().as_datetime())
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to update entry"))?;

                if result.rows_affected() == 1 {
                    return Ok(PutOutcome::Stored);
                }

                let stored = self.fetch_by_id(entry.id()).await?.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::EntryNotFound,
                        format!("Entry {} not found for versioned write", entry.id()),
                    )
                })?;
                Ok(PutOutcome::Conflict {
                    stored: Box::new(stored),
                })
            }
        }
    }

    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
        include_deleted: bool,
    ) -> Result<Vec<Entry>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM wellbeing_entries \
             WHERE owner_id = $1 \
               AND ($2::timestamptz IS NULL OR updated_at > $2) \
               AND ($3 OR NOT deleted) \
             ORDER BY updated_at, id"
        ))
        .bind(owner.as_str())
        .bind(since.map(|ts| *ts.as_datetime()))
        .bind(include_deleted)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query entries by owner"))?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn get_column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get column '{}': {}", name, e),
        )
    })
}

fn row_to_entry(row: sqlx::postgres::PgRow) -> Result<Entry, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let owner: String = get_column(&row, "owner_id")?;
    let tenant: uuid::Uuid = get_column(&row, "tenant_id")?;
    let mobile_id: String = get_column(&row, "mobile_id")?;
    let entry_type: String = get_column(&row, "entry_type")?;
    let occurred_at: chrono::DateTime<chrono::Utc> = get_column(&row, "occurred_at")?;
    let content: String = get_column(&row, "content")?;
    let mood: Option<i16> = get_column(&row, "mood")?;
    let stress: Option<i16> = get_column(&row, "stress")?;
    let energy: Option<i16> = get_column(&row, "energy")?;
    let tags: Vec<String> = get_column(&row, "tags")?;
    let triggers: Vec<String> = get_column(&row, "triggers")?;
    let version: i32 = get_column(&row, "version")?;
    let sync_status: String = get_column(&row, "sync_status")?;
    let deleted: bool = get_column(&row, "deleted")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get_column(&row, "updated_at")?;

    Ok(Entry::restore(
        EntryId::from_uuid(id),
        UserId::new(owner).map_err(corrupt("owner_id"))?,
        TenantId::from_uuid(tenant),
        MobileId::new(mobile_id).map_err(corrupt("mobile_id"))?,
        EntryType::parse(&entry_type)
            .ok_or_else(|| corrupt_value("entry_type", &entry_type))?,
        Timestamp::from_datetime(occurred_at),
        content,
        mood.map(|m| MoodScore::new(m as u8).map_err(corrupt("mood")))
            .transpose()?,
        stress
            .map(|s| StressScore::new(s as u8).map_err(corrupt("stress")))
            .transpose()?,
        energy
            .map(|e| EnergyScore::new(e as u8).map_err(corrupt("energy")))
            .transpose()?,
        tags,
        triggers,
        EntryVersion::from_u32(version as u32)
            .map_err(|_| corrupt_value("version", &version.to_string()))?,
        SyncStatus::parse(&sync_status)
            .ok_or_else(|| corrupt_value("sync_status", &sync_status))?,
        deleted,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn corrupt<E: std::fmt::Display>(column: &'static str) -> impl Fn(E) -> DomainError {
    move |e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored value for '{}' is invalid: {}", column, e),
        )
    }
}

fn corrupt_value(column: &str, value: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Stored value for '{}' is invalid: {}", column, value),
    )
}
