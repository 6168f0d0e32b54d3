pub mod application_dto;
pub mod auth_dto;
pub mod lookup_dto;
pub mod proposal_dto;
