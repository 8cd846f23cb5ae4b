// src/repositories/postgres/analytics.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use sqlx::types::Json;
use callboard_common::models::analytics::{AnalyticsEventRow, PricingViewEvent};
use callboard_common::traits::repository_traits::AnalyticsRepo;
use crate::Error;

/// Postgres-based analytics repository.
#[derive(Clone)]
pub struct PostgresAnalyticsRepository {
    pool: Pool<Postgres>,
}

impl PostgresAnalyticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Return up to `limit` most recent events of `event_type`.
    pub async fn get_recent_events(
        &self,
        event_type: &str,
        limit: i64,
    ) -> Result<Vec<AnalyticsEventRow>, Error> {
        let rows = sqlx::query_as::<_, AnalyticsEventRow>(
            r#"
            SELECT
                event_id,
                event_type,
                country,
                plan_viewed,
                session_id,
                organization_id,
                metadata,
                created_at
            FROM analytics_events
            WHERE event_type = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
            .bind(event_type)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[async_trait]
impl AnalyticsRepo for PostgresAnalyticsRepository {
    async fn insert_pricing_view(&self, event: &PricingViewEvent) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (
                event_id, event_type, country, plan_viewed,
                session_id, organization_id, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#
        )
            .bind(event.event_id)
            .bind(&event.event_type)
            .bind(&event.country)
            .bind(&event.plan_viewed)
            .bind(&event.session_id)
            .bind(&event.organization_id)
            .bind(Json(&event.metadata))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
