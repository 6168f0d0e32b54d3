use crate::database::expect_one;
use crate::error::Result;
use crate::models::degree::Degree;
use sqlx::PgPool;

#[derive(Clone)]
pub struct DegreeService {
    pool: PgPool,
}

impl DegreeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Degree> {
        let rows =
            sqlx::query_as::<_, Degree>("SELECT id, code, title FROM degree WHERE id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;
        expect_one(rows, || format!("Degree with id {} not found", id))
    }

    pub async fn get_all(&self) -> Result<Vec<Degree>> {
        let rows = sqlx::query_as::<_, Degree>("SELECT id, code, title FROM degree ORDER BY code")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn add_degree(&self, code: &str, title: &str) -> Result<Degree> {
        let degree = sqlx::query_as::<_, Degree>(
            "INSERT INTO degree (code, title) VALUES ($1, $2) RETURNING id, code, title",
        )
        .bind(code)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(degree)
    }
}
