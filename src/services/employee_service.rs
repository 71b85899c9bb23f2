use crate::dto::employee_dto::{CreateEmployeePayload, UpdateEmployeePayload};
use crate::error::{Error, Result};
use crate::models::employee::Employee;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let employees =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(employees)
    }

    pub async fn create_employee(&self, payload: CreateEmployeePayload) -> Result<Employee> {
        payload.validate()?;
        let first_name = super::required(payload.first_name, "first_name")?;
        let last_name = super::required(payload.last_name, "last_name")?;
        let email = super::required(payload.email, "email")?;
        let start_date = payload
            .start_date
            .ok_or_else(|| Error::BadRequest("Missing required field: start_date".to_string()))?;

        let mut tx = self.pool.begin().await?;
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE email = ?")
            .bind(&email)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "An employee with this email address already exists.".to_string(),
            ));
        }

        let now = Utc::now();
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (first_name, last_name, email, phone, address,
                start_date, end_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(start_date)
        .bind(payload.end_date)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Created employee {} ({})", employee.id, employee.email);
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: UpdateEmployeePayload,
    ) -> Result<Employee> {
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        let mut employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Employee not found".to_string()))?;

        if let Some(v) = payload.first_name {
            employee.first_name = v;
        }
        if let Some(v) = payload.last_name {
            employee.last_name = v;
        }
        if let Some(v) = payload.email {
            employee.email = v;
        }
        if let Some(v) = payload.phone {
            employee.phone = Some(v);
        }
        if let Some(v) = payload.address {
            employee.address = Some(v);
        }
        if let Some(v) = payload.start_date {
            employee.start_date = v;
        }
        if let Some(v) = payload.end_date {
            employee.end_date = Some(v);
        }

        let now = Utc::now();
        let updated = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, phone = ?, address = ?,
                start_date = ?, end_date = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.address)
        .bind(employee.start_date)
        .bind(employee.end_date)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Employee not found".to_string()));
        }
        info!("Deleted employee {}", id);
        Ok(())
    }
}
