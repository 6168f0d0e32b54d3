use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One passed exam in a student's career.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Career {
    pub id: i32,
    pub student_id: i32,
    pub course_code: String,
    pub course_title: String,
    pub cfu: i32,
    pub grade: i32,
    pub exam_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewCareer {
    pub student_id: i32,
    pub course_code: String,
    pub course_title: String,
    pub cfu: i32,
    pub grade: i32,
    pub exam_date: NaiveDate,
}
