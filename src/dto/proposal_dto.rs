use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::thesis_proposal::{NewThesisProposal, ThesisLevel, ThesisProposal};
use crate::services::proposal_filter::ProposalFilter;

fn level_from(raw: i16) -> Result<ThesisLevel> {
    ThesisLevel::try_from(raw).map_err(|e| Error::InvalidArgument(e.to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InsertProposalPayload {
    #[validate(custom(function = "crate::utils::validation::non_blank"))]
    pub title: String,
    #[validate(email)]
    pub supervisor: String,
    pub co_supervisor: Option<Vec<String>>,
    #[validate(
        length(min = 1),
        custom(function = "crate::utils::validation::non_blank_items")
    )]
    pub keywords: Vec<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "crate::utils::validation::non_blank"))]
    pub thesis_type: String,
    #[validate(
        length(min = 1),
        custom(function = "crate::utils::validation::non_blank_items")
    )]
    pub groups: Vec<String>,
    #[validate(custom(function = "crate::utils::validation::non_blank"))]
    pub description: String,
    pub required_knowledge: Option<Vec<String>>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "crate::utils::time::deserialize_date")]
    pub expiration: NaiveDate,
    #[validate(range(min = 1, max = 2))]
    pub level: i16,
    #[validate(
        length(min = 1),
        custom(function = "crate::utils::validation::non_blank_items")
    )]
    pub programmes: Vec<String>,
}

impl InsertProposalPayload {
    pub fn into_new(self, teacher_id: i32) -> Result<NewThesisProposal> {
        Ok(NewThesisProposal {
            teacher_id,
            level: level_from(self.level)?,
            title: self.title,
            supervisor: self.supervisor,
            co_supervisor: self.co_supervisor.unwrap_or_default(),
            keywords: self.keywords,
            thesis_type: self.thesis_type,
            groups: self.groups,
            description: self.description,
            required_knowledge: self.required_knowledge.unwrap_or_default(),
            notes: self.notes,
            expiration: self.expiration,
            programmes: self.programmes,
        })
    }
}

/// Body of `POST /api/ProposalsList/filter`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProposalFilterPayload {
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub professor: Option<i32>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub thesis_type: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    #[validate(range(min = 1, max = 2))]
    pub level: Option<i16>,
    pub groups: Option<Vec<String>>,
}

impl ProposalFilterPayload {
    pub fn into_filter(self) -> Result<ProposalFilter> {
        Ok(ProposalFilter {
            level: self.level.map(level_from).transpose()?,
            title: self.title,
            teacher_id: self.professor,
            date: self.date,
            types: self.thesis_type,
            keywords: self.keywords,
            groups: self.groups,
        })
    }
}

/// Row of the teacher's own proposal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub id: i32,
    pub thesis_title: String,
    pub thesis_expiration: NaiveDate,
    pub thesis_level: ThesisLevel,
    pub thesis_type: String,
}

impl From<ThesisProposal> for ProposalSummary {
    fn from(value: ThesisProposal) -> Self {
        Self {
            id: value.id,
            thesis_title: value.title,
            thesis_expiration: value.expiration,
            thesis_level: value.level,
            thesis_type: value.thesis_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpenProposalsQuery {
    pub date: Option<String>,
}
