use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub email: String,
    pub group_id: i32,
    pub department_id: i32,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeacherDetails {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub email: String,
    pub group_code: String,
    pub group_name: String,
    pub department_code: String,
    pub department_name: String,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub surname: String,
    pub name: String,
    pub email: String,
    pub group_id: i32,
    pub department_id: i32,
    pub password: Option<String>,
}
