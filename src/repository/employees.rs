//! Employees repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee with id {} not found", id)))
    }

    /// Get active employee by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE LOWER(email) = LOWER($1) AND is_active",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new employee with a pre-hashed password
    pub async fn create(&self, employee: &CreateEmployee, password_hash: String) -> AppResult<Employee> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO employees (firstname, lastname, email, phone, password, role, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, true, $7)
            RETURNING id
            "#,
        )
        .bind(&employee.firstname)
        .bind(&employee.lastname)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&password_hash)
        .bind(employee.role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// List employees
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY lastname, firstname",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Replace an employee's password hash
    pub async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        let now = Utc::now();

        sqlx::query("UPDATE employees SET password = $1, modified_at = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
