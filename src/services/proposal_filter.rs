//! Proposal search predicates.
//!
//! Each predicate renders one SQL clause with bound parameters and can also be
//! evaluated against an already loaded proposal. A filter is the conjunction of
//! the predicates it was given; fields that were not supplied produce no clause.

use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use crate::models::thesis_proposal::{ThesisLevel, ThesisProposal};

pub const PROPOSAL_COLUMNS: &str = "id, teacher_id, title, supervisor, co_supervisor, keywords, \
     type, groups, description, required_knowledge, notes, expiration, level, programmes, archived";

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalPredicate {
    /// Case-insensitive substring of the title.
    TitleContains(String),
    Teacher(i32),
    /// Still open on the given day: `expiration >= date`.
    OpenOn(NaiveDate),
    TypeIn(Vec<String>),
    KeywordsAny(Vec<String>),
    Level(ThesisLevel),
    GroupsAny(Vec<String>),
}

impl ProposalPredicate {
    pub fn push_clause(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            ProposalPredicate::TitleContains(needle) => {
                qb.push("strpos(lower(title), lower(")
                    .push_bind(needle.clone())
                    .push(")) > 0");
            }
            ProposalPredicate::Teacher(teacher_id) => {
                qb.push("teacher_id = ").push_bind(*teacher_id);
            }
            ProposalPredicate::OpenOn(date) => {
                qb.push("expiration >= ").push_bind(*date);
            }
            ProposalPredicate::TypeIn(types) => {
                qb.push("type = ANY(").push_bind(types.clone()).push(")");
            }
            ProposalPredicate::KeywordsAny(keywords) => {
                qb.push("keywords && ").push_bind(keywords.clone());
            }
            ProposalPredicate::Level(level) => {
                qb.push("level = ").push_bind(i16::from(*level));
            }
            ProposalPredicate::GroupsAny(groups) => {
                qb.push("groups && ").push_bind(groups.clone());
            }
        }
    }

    pub fn matches(&self, proposal: &ThesisProposal) -> bool {
        match self {
            ProposalPredicate::TitleContains(needle) => proposal
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            ProposalPredicate::Teacher(teacher_id) => proposal.teacher_id == *teacher_id,
            ProposalPredicate::OpenOn(date) => proposal.expiration >= *date,
            ProposalPredicate::TypeIn(types) => types.contains(&proposal.thesis_type),
            ProposalPredicate::KeywordsAny(keywords) => overlaps(&proposal.keywords, keywords),
            ProposalPredicate::Level(level) => proposal.level == *level,
            ProposalPredicate::GroupsAny(groups) => overlaps(&proposal.groups, groups),
        }
    }
}

fn overlaps(have: &[String], wanted: &[String]) -> bool {
    have.iter().any(|item| wanted.contains(item))
}

fn non_empty(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().filter(|items| !items.is_empty()).cloned()
}

/// Optional search criteria. Blank titles and empty lists count as not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalFilter {
    pub title: Option<String>,
    pub teacher_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub types: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub level: Option<ThesisLevel>,
    pub groups: Option<Vec<String>>,
}

impl ProposalFilter {
    pub fn predicates(&self) -> Vec<ProposalPredicate> {
        let mut predicates = Vec::new();
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            predicates.push(ProposalPredicate::TitleContains(title.to_string()));
        }
        if let Some(teacher_id) = self.teacher_id {
            predicates.push(ProposalPredicate::Teacher(teacher_id));
        }
        if let Some(date) = self.date {
            predicates.push(ProposalPredicate::OpenOn(date));
        }
        if let Some(types) = non_empty(&self.types) {
            predicates.push(ProposalPredicate::TypeIn(types));
        }
        if let Some(keywords) = non_empty(&self.keywords) {
            predicates.push(ProposalPredicate::KeywordsAny(keywords));
        }
        if let Some(level) = self.level {
            predicates.push(ProposalPredicate::Level(level));
        }
        if let Some(groups) = non_empty(&self.groups) {
            predicates.push(ProposalPredicate::GroupsAny(groups));
        }
        predicates
    }

    /// Archived proposals never match.
    pub fn matches(&self, proposal: &ThesisProposal) -> bool {
        !proposal.archived && self.predicates().iter().all(|p| p.matches(proposal))
    }

    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM thesis_proposal WHERE archived = false",
            PROPOSAL_COLUMNS
        ));
        for predicate in self.predicates() {
            qb.push(" AND ");
            predicate.push_clause(&mut qb);
        }
        qb.push(" ORDER BY id");
        qb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(id: i32, title: &str, level: ThesisLevel, groups: &[&str]) -> ThesisProposal {
        ThesisProposal {
            id,
            teacher_id: 1,
            title: title.to_string(),
            supervisor: "rossi@uni.it".into(),
            co_supervisor: vec![],
            keywords: vec!["AI".into(), "Vision".into()],
            thesis_type: "Research".into(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            description: "desc".into(),
            required_knowledge: vec![],
            notes: None,
            expiration: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            level,
            programmes: vec!["LM-32".into()],
            archived: false,
        }
    }

    fn sql(filter: &ProposalFilter) -> String {
        filter.to_query().sql().to_string()
    }

    #[test]
    fn empty_filter_only_excludes_archived() {
        assert_eq!(
            sql(&ProposalFilter::default()),
            format!(
                "SELECT {} FROM thesis_proposal WHERE archived = false ORDER BY id",
                PROPOSAL_COLUMNS
            )
        );
    }

    #[test]
    fn supplied_fields_become_numbered_clauses() {
        let filter = ProposalFilter {
            title: Some("Graph".into()),
            level: Some(ThesisLevel::Master),
            groups: Some(vec!["G1".into()]),
            ..Default::default()
        };
        let rendered = sql(&filter);
        assert!(rendered.ends_with(
            "WHERE archived = false AND strpos(lower(title), lower($1)) > 0 \
             AND level = $2 AND groups && $3 ORDER BY id"
        ));
    }

    #[test]
    fn every_field_renders_its_own_clause() {
        let filter = ProposalFilter {
            title: Some("x".into()),
            teacher_id: Some(3),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            types: Some(vec!["Research".into()]),
            keywords: Some(vec!["AI".into()]),
            level: Some(ThesisLevel::Bachelor),
            groups: Some(vec!["G1".into()]),
        };
        assert_eq!(filter.predicates().len(), 7);
        let rendered = sql(&filter);
        for clause in [
            "teacher_id = $2",
            "expiration >= $3",
            "type = ANY($4)",
            "keywords && $5",
            "level = $6",
            "groups && $7",
        ] {
            assert!(rendered.contains(clause), "missing {} in {}", clause, rendered);
        }
    }

    #[test]
    fn blank_title_and_empty_lists_impose_nothing() {
        let filter = ProposalFilter {
            title: Some("   ".into()),
            types: Some(vec![]),
            keywords: Some(vec![]),
            groups: Some(vec![]),
            ..Default::default()
        };
        assert!(filter.predicates().is_empty());
        assert!(filter.matches(&proposal(1, "Anything", ThesisLevel::Master, &[])));
    }

    #[test]
    fn level_and_group_select_only_the_bachelor_proposal() {
        let bachelor = proposal(1, "Bachelor thesis", ThesisLevel::Bachelor, &["G1"]);
        let master = proposal(2, "Master thesis", ThesisLevel::Master, &["G1"]);
        let filter = ProposalFilter {
            level: Some(ThesisLevel::Bachelor),
            groups: Some(vec!["G1".into()]),
            ..Default::default()
        };
        let hits: Vec<i32> = [bachelor, master]
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.id)
            .collect();
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn predicates_evaluate_in_memory() {
        let p = proposal(5, "Deep Learning for Robots", ThesisLevel::Master, &["G2", "G3"]);
        assert!(ProposalPredicate::TitleContains("learning".into()).matches(&p));
        assert!(!ProposalPredicate::TitleContains("compiler".into()).matches(&p));
        assert!(ProposalPredicate::Teacher(1).matches(&p));
        assert!(!ProposalPredicate::Teacher(2).matches(&p));
        assert!(ProposalPredicate::OpenOn(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()).matches(&p));
        assert!(!ProposalPredicate::OpenOn(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).matches(&p));
        assert!(ProposalPredicate::TypeIn(vec!["Company".into(), "Research".into()]).matches(&p));
        assert!(!ProposalPredicate::TypeIn(vec!["Company".into()]).matches(&p));
        assert!(ProposalPredicate::KeywordsAny(vec!["Vision".into()]).matches(&p));
        assert!(!ProposalPredicate::KeywordsAny(vec!["Networks".into()]).matches(&p));
        assert!(ProposalPredicate::GroupsAny(vec!["G3".into(), "G9".into()]).matches(&p));
        assert!(!ProposalPredicate::GroupsAny(vec!["G1".into()]).matches(&p));
    }

    #[test]
    fn archived_proposals_never_match() {
        let mut p = proposal(1, "Archived", ThesisLevel::Bachelor, &["G1"]);
        p.archived = true;
        assert!(!ProposalFilter::default().matches(&p));
    }
}
