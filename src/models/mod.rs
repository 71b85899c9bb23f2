pub mod candidate;
pub mod employee;
