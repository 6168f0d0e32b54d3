use crate::database::expect_one;
use crate::error::Result;
use crate::models::group::Group;
use sqlx::PgPool;

#[derive(Clone)]
pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Group> {
        let rows = sqlx::query_as::<_, Group>(
            r#"SELECT id, code, name, department_id FROM "group" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Group with id {} not found", id))
    }

    pub async fn get_all(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query_as::<_, Group>(
            r#"SELECT id, code, name, department_id FROM "group" ORDER BY code"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_department_id(&self, department_id: i32) -> Result<Vec<Group>> {
        let rows = sqlx::query_as::<_, Group>(
            r#"SELECT id, code, name, department_id FROM "group" WHERE department_id = $1 ORDER BY code"#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_group(&self, code: &str, name: &str, department_id: i32) -> Result<Group> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO "group" (code, name, department_id)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, department_id
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(group)
    }
}
