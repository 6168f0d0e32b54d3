pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    application_service::ApplicationService, career_service::CareerService,
    clock_service::ClockService, degree_service::DegreeService,
    department_service::DepartmentService, group_service::GroupService,
    proposal_service::ProposalService, student_service::StudentService,
    teacher_service::TeacherService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub student_service: StudentService,
    pub teacher_service: TeacherService,
    pub department_service: DepartmentService,
    pub degree_service: DegreeService,
    pub group_service: GroupService,
    pub career_service: CareerService,
    pub proposal_service: ProposalService,
    pub application_service: ApplicationService,
    pub clock_service: ClockService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            student_service: StudentService::new(pool.clone()),
            teacher_service: TeacherService::new(pool.clone()),
            department_service: DepartmentService::new(pool.clone()),
            degree_service: DegreeService::new(pool.clone()),
            group_service: GroupService::new(pool.clone()),
            career_service: CareerService::new(pool.clone()),
            proposal_service: ProposalService::new(pool.clone()),
            application_service: ApplicationService::new(pool.clone()),
            clock_service: ClockService::new(pool.clone()),
            config: Arc::new(config),
            pool,
        }
    }
}
