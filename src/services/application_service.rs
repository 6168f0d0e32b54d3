use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::expect_one;
use crate::error::{Error, Result};
use crate::middleware::auth::ActingAs;
use crate::models::application::{
    Application, ApplicationDetail, ApplicationStatus, Decision, StudentApplication,
    TeacherApplication,
};
use crate::services::{clock_service::ClockService, proposal_service::ProposalService};

const APPLICATION_COLUMNS: &str = "id, student_id, proposal_id, apply_date, status";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    proposals: ProposalService,
    clock: ClockService,
}

#[derive(sqlx::FromRow)]
struct OwnedStatus {
    #[sqlx(try_from = "Option<bool>")]
    status: ApplicationStatus,
    teacher_id: i32,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            proposals: ProposalService::new(pool.clone()),
            clock: ClockService::new(pool.clone()),
            pool,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Application> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM application WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        expect_one(rows, || format!("Application with id {} not found", id))
    }

    pub async fn get_status_by_id(&self, id: i32) -> Result<ApplicationStatus> {
        let rows = sqlx::query_scalar::<_, Option<bool>>(
            "SELECT status FROM application WHERE id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let status = expect_one(rows, || format!("Application with id {} not found", id))?;
        Ok(ApplicationStatus::from(status))
    }

    /// Newest first, with the proposal title and its teacher.
    pub async fn get_by_student_id(&self, student_id: i32) -> Result<Vec<StudentApplication>> {
        let rows = sqlx::query_as::<_, StudentApplication>(
            r#"
            SELECT a.id, a.student_id, a.proposal_id, a.apply_date, a.status,
                   tp.title AS thesis_title,
                   t.name AS teacher_name, t.surname AS teacher_surname, t.email AS teacher_email
            FROM application a
            JOIN thesis_proposal tp ON tp.id = a.proposal_id
            JOIN teacher t ON t.id = tp.teacher_id
            WHERE a.student_id = $1
            ORDER BY a.apply_date DESC, a.id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_proposal_id(&self, proposal_id: i32) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM application WHERE proposal_id = $1 ORDER BY id",
            APPLICATION_COLUMNS
        ))
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Applications received on any proposal owned by the teacher.
    pub async fn get_by_teacher_id(&self, teacher_id: i32) -> Result<Vec<TeacherApplication>> {
        let rows = sqlx::query_as::<_, TeacherApplication>(
            r#"
            SELECT a.id, a.student_id, a.proposal_id, a.apply_date, a.status,
                   tp.title AS thesis_title,
                   s.name AS student_name, s.surname AS student_surname
            FROM application a
            JOIN thesis_proposal tp ON tp.id = a.proposal_id
            JOIN student s ON s.id = a.student_id
            WHERE tp.teacher_id = $1
            ORDER BY a.apply_date DESC, a.id DESC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Application with applicant details, visible only to the proposal's owner.
    pub async fn get_teacher_detail(&self, actor: &ActingAs, id: i32) -> Result<ApplicationDetail> {
        let teacher_id = actor.teacher_id()?;
        let rows = sqlx::query_as::<_, ApplicationDetail>(
            r#"
            SELECT a.id, a.proposal_id, tp.teacher_id, tp.title AS thesis_title,
                   a.apply_date, a.status,
                   s.id AS student_id, s.name AS student_name, s.surname AS student_surname,
                   s.gender AS student_gender, s.nationality AS student_nationality,
                   s.email AS student_email, s.enrollment_year AS student_enrollment_year,
                   d.title AS degree_title
            FROM application a
            JOIN thesis_proposal tp ON tp.id = a.proposal_id
            JOIN student s ON s.id = a.student_id
            JOIN degree d ON d.id = s.degree_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let detail = expect_one(rows, || format!("Application with id {} not found", id))?;
        if detail.teacher_id != teacher_id {
            return Err(Error::Forbidden(format!(
                "Application {} concerns another teacher's proposal",
                id
            )));
        }
        Ok(detail)
    }

    /// Creates a pending application for the acting student.
    /// `apply_date` defaults to today on the virtual clock.
    pub async fn apply(
        &self,
        actor: &ActingAs,
        proposal_id: i32,
        apply_date: Option<NaiveDate>,
    ) -> Result<Application> {
        let student_id = actor.student_id()?;
        let proposal = self.proposals.get_by_id(proposal_id).await?;
        let today = self.clock.today().await?;
        if !proposal.is_open_on(today) {
            return Err(Error::ProposalClosed(proposal_id));
        }

        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM application WHERE student_id = $1 AND proposal_id = $2",
        )
        .bind(student_id)
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::DuplicateApplication {
                student_id,
                proposal_id,
            });
        }

        // The unique constraint settles two concurrent applies for the same pair.
        let inserted = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO application (student_id, proposal_id, apply_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, proposal_id) DO NOTHING
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(student_id)
        .bind(proposal_id)
        .bind(apply_date.unwrap_or(today))
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(application) => {
                tracing::info!(
                    application_id = application.id,
                    student_id,
                    proposal_id,
                    "application submitted"
                );
                Ok(application)
            }
            None => Err(Error::DuplicateApplication {
                student_id,
                proposal_id,
            }),
        }
    }

    /// Accepts or rejects a pending application on behalf of the owning teacher.
    ///
    /// The write is conditional on the row still being pending, so of two
    /// concurrent decisions exactly one updates the row; the loser reports
    /// `AlreadyDecided` with the state the winner left behind.
    pub async fn decide(
        &self,
        actor: &ActingAs,
        id: i32,
        decision: Decision,
    ) -> Result<Application> {
        let teacher_id = actor.teacher_id()?;

        let rows = sqlx::query_as::<_, OwnedStatus>(
            r#"
            SELECT a.status, tp.teacher_id
            FROM application a
            JOIN thesis_proposal tp ON tp.id = a.proposal_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let current = expect_one(rows, || format!("Application with id {} not found", id))?;
        if current.teacher_id != teacher_id {
            return Err(Error::Forbidden(format!(
                "Application {} concerns another teacher's proposal",
                id
            )));
        }
        let next = current.status.decide(id, decision)?;

        let updated = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE application SET status = $2
            WHERE id = $1
              AND status IS NULL
              AND proposal_id IN (SELECT id FROM thesis_proposal WHERE teacher_id = $3)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(next.as_db())
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(application) => {
                tracing::info!(
                    application_id = id,
                    teacher_id,
                    status = ?application.status,
                    "application decided"
                );
                Ok(application)
            }
            None => {
                let status = self.get_status_by_id(id).await?;
                tracing::warn!(application_id = id, ?status, "lost a concurrent decision");
                if status.is_decided() {
                    Err(Error::AlreadyDecided { id, status })
                } else {
                    Err(Error::Conflict(format!(
                        "Application {} changed while being decided",
                        id
                    )))
                }
            }
        }
    }

    /// Same as [`decide`](Self::decide), addressing the application by its pair.
    pub async fn decide_for_pair(
        &self,
        actor: &ActingAs,
        student_id: i32,
        proposal_id: i32,
        decision: Decision,
    ) -> Result<Application> {
        let rows = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM application WHERE student_id = $1 AND proposal_id = $2",
        )
        .bind(student_id)
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await?;
        let id = expect_one(rows, || {
            format!(
                "Application with student_id {} and proposal_id {} not found",
                student_id, proposal_id
            )
        })?;
        self.decide(actor, id, decision).await
    }
}
