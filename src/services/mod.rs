pub mod ats_client;
pub mod candidate_service;
pub mod employee_service;
pub mod sync_service;

use crate::error::{Error, Result};

pub(crate) fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| Error::BadRequest(format!("Missing required field: {}", field)))
}
