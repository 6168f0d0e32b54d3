use crate::database::expect_one;
use crate::error::Result;
use crate::models::department::Department;
use sqlx::PgPool;

#[derive(Clone)]
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Department> {
        let rows = sqlx::query_as::<_, Department>(
            "SELECT id, code, name FROM department WHERE id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Department with id {} not found", id))
    }

    pub async fn get_all(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>(
            "SELECT id, code, name FROM department ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_department(&self, code: &str, name: &str) -> Result<Department> {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO department (code, name) VALUES ($1, $2) RETURNING id, code, name",
        )
        .bind(code)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(department)
    }
}
