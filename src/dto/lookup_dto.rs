use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::teacher::Teacher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherListItem {
    pub id: i32,
    pub name: String,
    pub surname: String,
}

impl From<Teacher> for TeacherListItem {
    fn from(value: Teacher) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualClockPayload {
    pub virtual_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualClockResponse {
    pub active: bool,
    pub virtual_time: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}
