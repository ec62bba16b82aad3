use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use roster_common::models::employee::Employee;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub salary: Decimal,
    pub contract_date: NaiveDate,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            address: row.address,
            neighborhood: row.neighborhood,
            zip_code: row.zip_code,
            phone: row.phone,
            role: row.role,
            salary: row.salary,
            contract_date: row.contract_date,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields a caller may set when creating an employee. The owner is not part
/// of this struct; it is passed separately from the authenticated principal.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub salary: Decimal,
    pub contract_date: NaiveDate,
}

/// Partial update: `None` leaves the stored value untouched. Neither the id
/// nor the owner is expressible here.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub salary: Option<Decimal>,
    pub contract_date: Option<NaiveDate>,
}

/// Repository for employee records. Every query here is constrained by the
/// owning user id; a lookup without an owner filter does not exist in this
/// interface.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn create(pool: &PgPool, data: NewEmployee, owner_id: Uuid) -> Result<Employee> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "INSERT INTO employees (id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.neighborhood)
        .bind(&data.zip_code)
        .bind(&data.phone)
        .bind(&data.role)
        .bind(data.salary)
        .bind(data.contract_date)
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .context("Failed to create employee")?;
        Ok(row.into())
    }

    pub async fn list_all(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at \
             FROM employees WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .context("Failed to list employees")?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Case-insensitive substring match on `name`, scoped to the owner.
    pub async fn list_by_name(pool: &PgPool, owner_id: Uuid, name: &str) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at \
             FROM employees WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%' ORDER BY created_at",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_all(pool)
        .await
        .context("Failed to list employees by name")?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Substring match on `name` plus exact match on `role`, scoped to the owner.
    pub async fn list_by_name_and_role(
        pool: &PgPool,
        owner_id: Uuid,
        name: &str,
        role: &str,
    ) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at \
             FROM employees WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%' AND role = $3 ORDER BY created_at",
        )
        .bind(owner_id)
        .bind(name)
        .bind(role)
        .fetch_all(pool)
        .await
        .context("Failed to list employees by name and role")?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// `None` covers both an id that does not exist and one owned by a
    /// different user; callers cannot tell the two apart.
    pub async fn get_by_id(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at \
             FROM employees WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get employee")?;
        Ok(row.map(Employee::from))
    }

    /// Conditional write keyed on id + owner. Returns `None` when zero rows
    /// match, with the same ambiguity as `get_by_id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "UPDATE employees SET \
                name = COALESCE($3, name), \
                address = COALESCE($4, address), \
                neighborhood = COALESCE($5, neighborhood), \
                zip_code = COALESCE($6, zip_code), \
                phone = COALESCE($7, phone), \
                role = COALESCE($8, role), \
                salary = COALESCE($9, salary), \
                contract_date = COALESCE($10, contract_date), \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING id, name, address, neighborhood, zip_code, phone, role, salary, contract_date, owner_id, created_at, updated_at",
        )
        .bind(id)
        .bind(owner_id)
        .bind(changes.name)
        .bind(changes.address)
        .bind(changes.neighborhood)
        .bind(changes.zip_code)
        .bind(changes.phone)
        .bind(changes.role)
        .bind(changes.salary)
        .bind(changes.contract_date)
        .fetch_optional(pool)
        .await
        .context("Failed to update employee")?;
        Ok(row.map(Employee::from))
    }

    /// Conditional delete keyed on id + owner. Returns the number of rows
    /// matched; callers map 0 to not-found.
    pub async fn remove(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await
            .context("Failed to delete employee")?;
        Ok(result.rows_affected())
    }
}
