use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::expect_one;
use crate::error::{Error, Result};
use crate::middleware::auth::ActingAs;
use crate::models::thesis_proposal::{NewThesisProposal, ThesisProposal};
use crate::services::proposal_filter::{ProposalFilter, PROPOSAL_COLUMNS};

#[derive(Clone)]
pub struct ProposalService {
    pool: PgPool,
}

impl ProposalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ThesisProposal> {
        let rows = sqlx::query_as::<_, ThesisProposal>(&format!(
            "SELECT {} FROM thesis_proposal WHERE id = $1",
            PROPOSAL_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Thesis proposal with id {} not found", id))
    }

    /// Every proposal, archived ones included.
    pub async fn get_all(&self) -> Result<Vec<ThesisProposal>> {
        let rows = sqlx::query_as::<_, ThesisProposal>(&format!(
            "SELECT {} FROM thesis_proposal ORDER BY id",
            PROPOSAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_teacher_id(&self, teacher_id: i32) -> Result<Vec<ThesisProposal>> {
        let rows = sqlx::query_as::<_, ThesisProposal>(&format!(
            "SELECT {} FROM thesis_proposal WHERE teacher_id = $1 ORDER BY id",
            PROPOSAL_COLUMNS
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// A teacher's active proposals: the ones not archived, expired or not.
    pub async fn get_active_by_teacher_id(&self, teacher_id: i32) -> Result<Vec<ThesisProposal>> {
        self.search(&ProposalFilter {
            teacher_id: Some(teacher_id),
            ..Default::default()
        })
        .await
    }

    pub async fn get_not_expired(&self, from: NaiveDate) -> Result<Vec<ThesisProposal>> {
        self.search(&ProposalFilter {
            date: Some(from),
            ..Default::default()
        })
        .await
    }

    pub async fn search(&self, filter: &ProposalFilter) -> Result<Vec<ThesisProposal>> {
        let mut query = filter.to_query();
        let rows = query
            .build_query_as::<ThesisProposal>()
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(
            predicates = filter.predicates().len(),
            hits = rows.len(),
            "proposal search"
        );
        Ok(rows)
    }

    pub async fn add_thesis_proposal(&self, new: NewThesisProposal) -> Result<ThesisProposal> {
        let proposal = sqlx::query_as::<_, ThesisProposal>(&format!(
            r#"
            INSERT INTO thesis_proposal (
                teacher_id, title, supervisor, co_supervisor, keywords, type, groups,
                description, required_knowledge, notes, expiration, level, programmes
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12, $13
            )
            RETURNING {}
            "#,
            PROPOSAL_COLUMNS
        ))
        .bind(new.teacher_id)
        .bind(new.title)
        .bind(new.supervisor)
        .bind(new.co_supervisor)
        .bind(new.keywords)
        .bind(new.thesis_type)
        .bind(new.groups)
        .bind(new.description)
        .bind(new.required_knowledge)
        .bind(new.notes)
        .bind(new.expiration)
        .bind(i16::from(new.level))
        .bind(new.programmes)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(
            proposal_id = proposal.id,
            teacher_id = proposal.teacher_id,
            "thesis proposal created"
        );
        Ok(proposal)
    }

    /// Closes a proposal to new applications. Only its owner may do this.
    pub async fn archive(&self, actor: &ActingAs, id: i32) -> Result<ThesisProposal> {
        let teacher_id = actor.teacher_id()?;
        let archived = sqlx::query_as::<_, ThesisProposal>(&format!(
            r#"
            UPDATE thesis_proposal SET archived = TRUE
            WHERE id = $1 AND teacher_id = $2
            RETURNING {}
            "#,
            PROPOSAL_COLUMNS
        ))
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        match archived {
            Some(proposal) => {
                tracing::info!(proposal_id = id, teacher_id, "thesis proposal archived");
                Ok(proposal)
            }
            None => {
                // Distinguish a missing proposal from someone else's.
                self.get_by_id(id).await?;
                Err(Error::Forbidden(format!(
                    "Thesis proposal {} belongs to another teacher",
                    id
                )))
            }
        }
    }

    pub async fn get_types(&self) -> Result<Vec<String>> {
        let types = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT type FROM thesis_proposal ORDER BY type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    pub async fn get_keywords(&self) -> Result<Vec<String>> {
        let keywords = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT unnest(keywords) AS keyword FROM thesis_proposal ORDER BY keyword",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(keywords)
    }

    pub async fn get_groups(&self) -> Result<Vec<String>> {
        let groups = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT unnest(groups) AS group_code FROM thesis_proposal ORDER BY group_code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }
}
