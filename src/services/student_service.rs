use crate::database::{expect_at_most_one, expect_one};
use crate::error::Result;
use crate::models::student::{NewStudent, Student, StudentDetails};
use crate::utils::crypto::hash_password;
use sqlx::PgPool;

const STUDENT_COLUMNS: &str =
    "id, surname, name, gender, nationality, email, degree_id, enrollment_year, password_hash";

#[derive(Clone)]
pub struct StudentService {
    pool: PgPool,
}

impl StudentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Student> {
        let rows = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM student WHERE id = $1",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Student with id {} not found", id))
    }

    pub async fn get_all(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM student ORDER BY surname, name, id",
            STUDENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Student>> {
        let rows = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM student WHERE lower(email) = lower($1)",
            STUDENT_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        expect_at_most_one(rows, || format!("Student with email {}", email))
    }

    pub async fn get_details_by_id(&self, id: i32) -> Result<StudentDetails> {
        let rows = sqlx::query_as::<_, StudentDetails>(
            r#"
            SELECT s.id, s.surname, s.name, s.gender, s.nationality, s.email, s.enrollment_year,
                   d.code AS degree_code, d.title AS degree_title
            FROM student s
            JOIN degree d ON d.id = s.degree_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Student with id {} not found", id))
    }

    pub async fn add_student(&self, new: NewStudent) -> Result<Student> {
        let password_hash = new.password.as_deref().map(hash_password).transpose()?;
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO student (surname, name, gender, nationality, email, degree_id, enrollment_year, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(new.surname)
        .bind(new.name)
        .bind(new.gender)
        .bind(new.nationality)
        .bind(new.email)
        .bind(new.degree_id)
        .bind(new.enrollment_year)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(student_id = student.id, "student imported");
        Ok(student)
    }
}
