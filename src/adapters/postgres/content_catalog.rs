//! PostgreSQL implementation of ContentCatalog.
//!
//! Fetches the tenant's active rows and applies the finer filters
//! (evidence floor, level, seasonality) in Rust, keeping the SQL to one
//! shape.

use async_trait::async_trait;
use chrono::Datelike;
use sqlx::{PgPool, Row};

use crate::domain::content::{
    ContentCategory, ContentItem, ContentLevel, EvidenceLevel, PriorityScore, SeasonalWindow,
};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, TenantId, Timestamp};
use crate::ports::{CatalogFilters, ContentCatalog};

/// PostgreSQL implementation of ContentCatalog.
#[derive(Clone)]
pub struct PostgresContentCatalog {
    pool: PgPool,
}

impl PostgresContentCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentCatalog for PostgresContentCatalog {
    async fn query_active(
        &self,
        tenant: TenantId,
        filters: &CatalogFilters,
    ) -> Result<Vec<ContentItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, tenant_id, title, category, evidence, priority, level,
                   tags, season_start, season_end, active
            FROM content_items
            WHERE tenant_id = $1 AND active
            ORDER BY priority DESC, id
            "#,
        )
        .bind(tenant.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::CatalogUnavailable,
                format!("Failed to query content catalog: {}", e),
            )
        })?;

        let month = Timestamp::now().as_datetime().month() as u8;
        let items: Result<Vec<ContentItem>, DomainError> =
            rows.into_iter().map(row_to_item).collect();
        Ok(items?
            .into_iter()
            .filter(|item| item.in_season(month))
            .filter(|item| filters.matches(item))
            .collect())
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

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<ContentItem, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let tenant: uuid::Uuid = get_column(&row, "tenant_id")?;
    let title: String = get_column(&row, "title")?;
    let category: String = get_column(&row, "category")?;
    let evidence: String = get_column(&row, "evidence")?;
    let priority: i16 = get_column(&row, "priority")?;
    let level: String = get_column(&row, "level")?;
    let tags: Vec<String> = get_column(&row, "tags")?;
    let season_start: Option<i16> = get_column(&row, "season_start")?;
    let season_end: Option<i16> = get_column(&row, "season_end")?;
    let active: bool = get_column(&row, "active")?;

    let corrupt = |column: &str, value: String| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored value for '{}' is invalid: {}", column, value),
        )
    };

    let seasonal = match (season_start, season_end) {
        (Some(start), Some(end)) => Some(
            SeasonalWindow::new(start as u8, end as u8)
                .map_err(|e| corrupt("season", e.to_string()))?,
        ),
        (None, None) => None,
        _ => return Err(corrupt("season", "half-open seasonal window".to_string())),
    };

    Ok(ContentItem {
        id: ContentId::from_uuid(id),
        tenant: TenantId::from_uuid(tenant),
        title,
        category: ContentCategory::parse(&category)
            .ok_or_else(|| corrupt("category", category.clone()))?,
        evidence: EvidenceLevel::parse(&evidence)
            .ok_or_else(|| corrupt("evidence", evidence.clone()))?,
        priority: PriorityScore::new(priority as u8)
            .map_err(|e| corrupt("priority", e.to_string()))?,
        level: ContentLevel::parse(&level).ok_or_else(|| corrupt("level", level.clone()))?,
        tags,
        seasonal,
        active,
    })
}
