use crate::database::{expect_at_most_one, expect_one};
use crate::error::Result;
use crate::models::teacher::{NewTeacher, Teacher, TeacherDetails};
use crate::utils::crypto::hash_password;
use sqlx::PgPool;

const TEACHER_COLUMNS: &str = "id, surname, name, email, group_id, department_id, password_hash";

#[derive(Clone)]
pub struct TeacherService {
    pool: PgPool,
}

impl TeacherService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Teacher> {
        let rows = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teacher WHERE id = $1",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Teacher with id {} not found", id))
    }

    pub async fn get_all(&self) -> Result<Vec<Teacher>> {
        let rows = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teacher ORDER BY surname, name, id",
            TEACHER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        let rows = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teacher WHERE lower(email) = lower($1)",
            TEACHER_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        expect_at_most_one(rows, || format!("Teacher with email {}", email))
    }

    pub async fn get_details_by_id(&self, id: i32) -> Result<TeacherDetails> {
        let rows = sqlx::query_as::<_, TeacherDetails>(
            r#"
            SELECT t.id, t.surname, t.name, t.email,
                   g.code AS group_code, g.name AS group_name,
                   d.code AS department_code, d.name AS department_name
            FROM teacher t
            JOIN "group" g ON g.id = t.group_id
            JOIN department d ON d.id = t.department_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Teacher with id {} not found", id))
    }

    pub async fn add_teacher(&self, new: NewTeacher) -> Result<Teacher> {
        let password_hash = new.password.as_deref().map(hash_password).transpose()?;
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"
            INSERT INTO teacher (surname, name, email, group_id, department_id, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            TEACHER_COLUMNS
        ))
        .bind(new.surname)
        .bind(new.name)
        .bind(new.email)
        .bind(new.group_id)
        .bind(new.department_id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(teacher_id = teacher.id, "teacher imported");
        Ok(teacher)
    }
}
