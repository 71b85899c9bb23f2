pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    ats_client::AtsClient, candidate_service::CandidateService,
    employee_service::EmployeeService, sync_service::SyncService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub candidate_service: CandidateService,
    pub employee_service: EmployeeService,
    pub sync_service: SyncService,
}

impl AppState {
    pub fn new(pool: SqlitePool, ats: Arc<dyn AtsClient>) -> Self {
        let candidate_service = CandidateService::new(pool.clone());
        let employee_service = EmployeeService::new(pool.clone());
        let sync_service = SyncService::new(pool.clone(), ats);

        Self {
            pool,
            candidate_service,
            employee_service,
            sync_service,
        }
    }
}
