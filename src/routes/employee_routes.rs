use crate::dto::employee_dto::{CreateEmployeePayload, UpdateEmployeePayload};
use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let employees = state.employee_service.list_employees().await?;
    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl axum::response::IntoResponse> {
    let employee = state.employee_service.create_employee(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    let employee = state.employee_service.get_employee(id).await?;
    match employee {
        Some(e) => Ok(Json(e)),
        None => Err(crate::error::Error::NotFound("Employee not found".into())),
    }
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl axum::response::IntoResponse> {
    let employee = state.employee_service.update_employee(id, payload).await?;
    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse> {
    state.employee_service.delete_employee(id).await?;
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}
