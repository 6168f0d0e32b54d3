use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub email: String,
    pub degree_id: i32,
    pub enrollment_year: i32,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

/// Student joined with the title of the degree they are enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentDetails {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub email: String,
    pub enrollment_year: i32,
    pub degree_code: String,
    pub degree_title: String,
}

/// Administrative import record.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub surname: String,
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub email: String,
    pub degree_id: i32,
    pub enrollment_year: i32,
    pub password: Option<String>,
}
