use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::models::virtual_clock::VirtualClock;
use crate::utils::time;

/// Single-row override of "now", used to make date-dependent behaviour reproducible.
#[derive(Clone)]
pub struct ClockService {
    pool: PgPool,
}

impl ClockService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<VirtualClock>> {
        let clock = sqlx::query_as::<_, VirtualClock>(
            "SELECT onerow_id, virtual_time FROM virtual_clock",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(clock)
    }

    pub async fn exists(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM virtual_clock)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn set(&self, virtual_time: DateTime<Utc>) -> Result<VirtualClock> {
        let clock = sqlx::query_as::<_, VirtualClock>(
            r#"
            INSERT INTO virtual_clock (onerow_id, virtual_time) VALUES (TRUE, $1)
            ON CONFLICT (onerow_id) DO UPDATE SET virtual_time = EXCLUDED.virtual_time
            RETURNING onerow_id, virtual_time
            "#,
        )
        .bind(virtual_time)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(virtual_time = %clock.virtual_time, "virtual clock set");
        Ok(clock)
    }

    /// Returns whether a virtual time was in place.
    pub async fn delete(&self) -> Result<bool> {
        let res = sqlx::query("DELETE FROM virtual_clock")
            .execute(&self.pool)
            .await?;
        if res.rows_affected() > 0 {
            tracing::info!("virtual clock cleared, back to wall time");
        }
        Ok(res.rows_affected() > 0)
    }

    pub async fn now(&self) -> Result<DateTime<Utc>> {
        Ok(match self.get().await? {
            Some(clock) => clock.virtual_time,
            None => time::now(),
        })
    }

    pub async fn today(&self) -> Result<NaiveDate> {
        Ok(time::today_of(self.now().await?))
    }
}
