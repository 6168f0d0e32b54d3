pub mod application_service;
pub mod career_service;
pub mod clock_service;
pub mod degree_service;
pub mod department_service;
pub mod group_service;
pub mod proposal_filter;
pub mod proposal_service;
pub mod student_service;
pub mod teacher_service;
