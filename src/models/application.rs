use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Error, Result};

/// Decision state of an application. Stored as a nullable boolean:
/// `NULL` pending, `true` accepted, `false` rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl From<bool> for Decision {
    fn from(accept: bool) -> Self {
        if accept {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }
}

impl From<Option<bool>> for ApplicationStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => ApplicationStatus::Pending,
            Some(true) => ApplicationStatus::Accepted,
            Some(false) => ApplicationStatus::Rejected,
        }
    }
}

impl ApplicationStatus {
    pub fn as_db(self) -> Option<bool> {
        match self {
            ApplicationStatus::Pending => None,
            ApplicationStatus::Accepted => Some(true),
            ApplicationStatus::Rejected => Some(false),
        }
    }

    pub fn is_decided(self) -> bool {
        self != ApplicationStatus::Pending
    }

    /// Next state after `decision`. Accepted and Rejected are terminal.
    pub fn decide(self, id: i32, decision: Decision) -> Result<Self> {
        match (self, decision) {
            (ApplicationStatus::Pending, Decision::Accept) => Ok(ApplicationStatus::Accepted),
            (ApplicationStatus::Pending, Decision::Reject) => Ok(ApplicationStatus::Rejected),
            (current, _) => Err(Error::AlreadyDecided {
                id,
                status: current,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub student_id: i32,
    pub proposal_id: i32,
    pub apply_date: NaiveDate,
    #[sqlx(try_from = "Option<bool>")]
    pub status: ApplicationStatus,
}

/// Application as listed to the teacher owning the proposal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeacherApplication {
    pub id: i32,
    pub student_id: i32,
    pub proposal_id: i32,
    pub apply_date: NaiveDate,
    #[sqlx(try_from = "Option<bool>")]
    pub status: ApplicationStatus,
    pub thesis_title: String,
    pub student_name: String,
    pub student_surname: String,
}

/// Application as listed to the student who submitted it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentApplication {
    pub id: i32,
    pub student_id: i32,
    pub proposal_id: i32,
    pub apply_date: NaiveDate,
    #[sqlx(try_from = "Option<bool>")]
    pub status: ApplicationStatus,
    pub thesis_title: String,
    pub teacher_name: String,
    pub teacher_surname: String,
    pub teacher_email: String,
}

/// Application joined with the applicant and the proposal title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationDetail {
    pub id: i32,
    pub proposal_id: i32,
    pub teacher_id: i32,
    pub thesis_title: String,
    pub apply_date: NaiveDate,
    #[sqlx(try_from = "Option<bool>")]
    pub status: ApplicationStatus,
    pub student_id: i32,
    pub student_name: String,
    pub student_surname: String,
    pub student_gender: String,
    pub student_nationality: String,
    pub student_email: String,
    pub student_enrollment_year: i32,
    pub degree_title: String,
}
