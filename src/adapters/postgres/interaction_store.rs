//! PostgreSQL implementation of InteractionStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::content::{ContentCategory, ContentLevel};
use crate::domain::entry::{MoodScore, StressScore};
use crate::domain::foundation::{
    ContentId, DomainError, EntryId, ErrorCode, InteractionId, Timestamp, UserId,
};
use crate::domain::interaction::{InteractionEvent, InteractionType};
use crate::ports::InteractionStore;

/// PostgreSQL implementation of InteractionStore.
#[derive(Clone)]
pub struct PostgresInteractionStore {
    pool: PgPool,
}

impl PostgresInteractionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INTERACTION_COLUMNS: &str = "id, owner_id, content_id, category, level, entry_id, \
     interaction_type, engagement, mood_at_delivery, stress_at_delivery, occurred_at";

#[async_trait]
impl InteractionStore for PostgresInteractionStore {
    async fn append(&self, event: InteractionEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO content_interactions (
                id, owner_id, content_id, category, level, entry_id,
                interaction_type, engagement, mood_at_delivery,
                stress_at_delivery, occurred_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.owner().as_str())
        .bind(event.content_id().as_uuid())
        .bind(event.category().as_str())
        .bind(event.level().as_str())
        .bind(event.entry_id().map(|id| *id.as_uuid()))
        .bind(event.interaction_type().as_str())
        .bind(event.engagement())
        .bind(event.mood_at_delivery().map(|m| m.as_u8() as i16))
        .bind(event.stress_at_delivery().map(|s| s.as_u8() as i16))
        .bind(event.occurred_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert interaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn query_by_owner(
        &self,
        owner: &UserId,
        since: Option<Timestamp>,
    ) -> Result<Vec<InteractionEvent>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {INTERACTION_COLUMNS} FROM content_interactions \
             WHERE owner_id = $1 \
               AND ($2::timestamptz IS NULL OR occurred_at >= $2) \
             ORDER BY occurred_at, id"
        ))
        .bind(owner.as_str())
        .bind(since.map(|ts| *ts.as_datetime()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query interactions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_interaction).collect()
    }
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

fn row_to_interaction(row: sqlx::postgres::PgRow) -> Result<InteractionEvent, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let owner: String = get_column(&row, "owner_id")?;
    let content_id: uuid::Uuid = get_column(&row, "content_id")?;
    let category: String = get_column(&row, "category")?;
    let level: String = get_column(&row, "level")?;
    let entry_id: Option<uuid::Uuid> = get_column(&row, "entry_id")?;
    let interaction_type: String = get_column(&row, "interaction_type")?;
    let engagement: i32 = get_column(&row, "engagement")?;
    let mood: Option<i16> = get_column(&row, "mood_at_delivery")?;
    let stress: Option<i16> = get_column(&row, "stress_at_delivery")?;
    let occurred_at: chrono::DateTime<chrono::Utc> = get_column(&row, "occurred_at")?;

    let corrupt = |column: &str, value: &str| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored value for '{}' is invalid: {}", column, value),
        )
    };

    Ok(InteractionEvent::restore(
        InteractionId::from_uuid(id),
        UserId::new(owner).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Stored value for 'owner_id' is invalid: {}", e),
            )
        })?,
        ContentId::from_uuid(content_id),
        ContentCategory::parse(&category).ok_or_else(|| corrupt("category", &category))?,
        ContentLevel::parse(&level).ok_or_else(|| corrupt("level", &level))?,
        entry_id.map(EntryId::from_uuid),
        InteractionType::parse(&interaction_type)
            .ok_or_else(|| corrupt("interaction_type", &interaction_type))?,
        engagement,
        mood.map(|m| {
            MoodScore::new(m as u8).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored value for 'mood_at_delivery' is invalid: {}", e),
                )
            })
        })
        .transpose()?,
        stress
            .map(|s| {
                StressScore::new(s as u8).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Stored value for 'stress_at_delivery' is invalid: {}", e),
                    )
                })
            })
            .transpose()?,
        Timestamp::from_datetime(occurred_at),
    ))
}
