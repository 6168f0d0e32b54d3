use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::{ApplicationDetail, ApplicationStatus};
use crate::models::career::Career;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyPayload {
    #[validate(range(min = 1))]
    pub proposal_id: i32,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_optional_date")]
    pub apply_date: Option<NaiveDate>,
}

/// `true` accepts, `false` rejects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecidePayload {
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetailResponse {
    pub detail: ApplicationDetail,
    pub status: ApplicationStatus,
    pub career: Vec<Career>,
}
