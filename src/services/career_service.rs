use crate::error::Result;
use crate::models::career::{Career, NewCareer};
use sqlx::PgPool;

#[derive(Clone)]
pub struct CareerService {
    pool: PgPool,
}

impl CareerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_student_id(&self, student_id: i32) -> Result<Vec<Career>> {
        let rows = sqlx::query_as::<_, Career>(
            r#"
            SELECT id, student_id, course_code, course_title, cfu, grade, exam_date
            FROM career
            WHERE student_id = $1
            ORDER BY exam_date, course_code
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_career(&self, record: NewCareer) -> Result<Career> {
        let career = sqlx::query_as::<_, Career>(
            r#"
            INSERT INTO career (student_id, course_code, course_title, cfu, grade, exam_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_id, course_code, course_title, cfu, grade, exam_date
            "#,
        )
        .bind(record.student_id)
        .bind(record.course_code)
        .bind(record.course_title)
        .bind(record.cfu)
        .bind(record.grade)
        .bind(record.exam_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(career)
    }
}
