use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VirtualClock {
    pub onerow_id: bool,
    pub virtual_time: DateTime<Utc>,
}
