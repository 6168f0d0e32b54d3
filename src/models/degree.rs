use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Degree {
    pub id: i32,
    pub code: String,
    pub title: String,
}
