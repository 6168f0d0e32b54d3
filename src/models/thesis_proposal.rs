use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("thesis level must be 1 (bachelor) or 2 (master), got {0}")]
pub struct InvalidLevel(pub i16);

/// Degree level a proposal is meant for. Stored and transported as 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum ThesisLevel {
    Bachelor,
    Master,
}

impl TryFrom<i16> for ThesisLevel {
    type Error = InvalidLevel;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ThesisLevel::Bachelor),
            2 => Ok(ThesisLevel::Master),
            other => Err(InvalidLevel(other)),
        }
    }
}

impl From<ThesisLevel> for i16 {
    fn from(level: ThesisLevel) -> Self {
        match level {
            ThesisLevel::Bachelor => 1,
            ThesisLevel::Master => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ThesisProposal {
    pub id: i32,
    pub teacher_id: i32,
    pub title: String,
    pub supervisor: String,
    pub co_supervisor: Vec<String>,
    pub keywords: Vec<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub thesis_type: String,
    pub groups: Vec<String>,
    pub description: String,
    pub required_knowledge: Vec<String>,
    pub notes: Option<String>,
    pub expiration: NaiveDate,
    #[sqlx(try_from = "i16")]
    pub level: ThesisLevel,
    pub programmes: Vec<String>,
    pub archived: bool,
}

impl ThesisProposal {
    /// Whether a student may still apply on `today`.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        !self.archived && self.expiration >= today
    }
}

/// Field set for a proposal about to be inserted; id and archived are server-assigned.
#[derive(Debug, Clone)]
pub struct NewThesisProposal {
    pub teacher_id: i32,
    pub title: String,
    pub supervisor: String,
    pub co_supervisor: Vec<String>,
    pub keywords: Vec<String>,
    pub thesis_type: String,
    pub groups: Vec<String>,
    pub description: String,
    pub required_knowledge: Vec<String>,
    pub notes: Option<String>,
    pub expiration: NaiveDate,
    pub level: ThesisLevel,
    pub programmes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_its_wire_number() {
        assert_eq!(ThesisLevel::try_from(1), Ok(ThesisLevel::Bachelor));
        assert_eq!(ThesisLevel::try_from(2), Ok(ThesisLevel::Master));
        assert_eq!(ThesisLevel::try_from(3), Err(InvalidLevel(3)));
        assert_eq!(serde_json::to_string(&ThesisLevel::Master).unwrap(), "2");
        assert!(serde_json::from_str::<ThesisLevel>("0").is_err());
    }

    #[test]
    fn archived_or_expired_proposals_are_closed() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut proposal = ThesisProposal {
            id: 1,
            teacher_id: 1,
            title: "Compilers".into(),
            supervisor: "t@uni.it".into(),
            co_supervisor: vec![],
            keywords: vec![],
            thesis_type: "Research".into(),
            groups: vec![],
            description: "d".into(),
            required_knowledge: vec![],
            notes: None,
            expiration: today,
            level: ThesisLevel::Bachelor,
            programmes: vec![],
            archived: false,
        };
        assert!(proposal.is_open_on(today));
        assert!(!proposal.is_open_on(today.succ_opt().unwrap()));
        proposal.archived = true;
        assert!(!proposal.is_open_on(today));
    }
}
