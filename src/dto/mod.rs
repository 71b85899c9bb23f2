pub mod candidate_dto;
pub mod employee_dto;
pub mod sync_dto;
