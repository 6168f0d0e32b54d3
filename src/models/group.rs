use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Research group a teacher belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub department_id: i32,
}
