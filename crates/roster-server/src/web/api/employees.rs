use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use roster_db::{EmployeeChanges, EmployeeRepo, NewEmployee};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Fields a client may set when creating an employee. Anything else in the
/// body, an `ownerId` in particular, is dropped on deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub salary: Decimal,
    pub contract_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub salary: Option<Decimal>,
    pub contract_date: Option<NaiveDate>,
}

/// 404 used for both "no such employee" and "not yours"; the two cases are
/// indistinguishable from the outside.
fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

/// GET /employees?name=&role=
#[tracing::instrument(skip(state, auth))]
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListEmployeesQuery>,
) -> impl IntoResponse {
    let owner_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // Empty parameters count as absent; a role with no name falls back to
    // the full listing
    let name = query.name.as_deref().filter(|s| !s.is_empty());
    let role = query.role.as_deref().filter(|s| !s.is_empty());

    let result = match (name, role) {
        (Some(name), Some(role)) => {
            EmployeeRepo::list_by_name_and_role(&state.pool, owner_id, name, role).await
        }
        (Some(name), None) => EmployeeRepo::list_by_name(&state.pool, owner_id, name).await,
        _ => EmployeeRepo::list_all(&state.pool, owner_id).await,
    };

    match result {
        Ok(employees) => Json(employees).into_response(),
        Err(e) => {
            tracing::error!("Failed to list employees: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /employees/{id}
#[tracing::instrument(skip(state, auth))]
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let owner_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // A malformed id is treated like an unknown one
    let id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => return not_found(),
    };

    match EmployeeRepo::get_by_id(&state.pool, owner_id, id).await {
        Ok(Some(employee)) => Json(employee).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!("Failed to get employee: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// POST /employees
#[tracing::instrument(skip(state, auth, req))]
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    let owner_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let data = NewEmployee {
        name: req.name,
        address: req.address,
        neighborhood: req.neighborhood,
        zip_code: req.zip_code,
        phone: req.phone,
        role: req.role,
        salary: req.salary,
        contract_date: req.contract_date,
    };

    match EmployeeRepo::create(&state.pool, data, owner_id).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(e) => {
            tracing::error!("Failed to create employee: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// PUT /employees/{id}
#[tracing::instrument(skip(state, auth, req))]
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    let owner_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => return not_found(),
    };

    let changes = EmployeeChanges {
        name: req.name,
        address: req.address,
        neighborhood: req.neighborhood,
        zip_code: req.zip_code,
        phone: req.phone,
        role: req.role,
        salary: req.salary,
        contract_date: req.contract_date,
    };

    match EmployeeRepo::update(&state.pool, owner_id, id, changes).await {
        Ok(Some(employee)) => Json(employee).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!("Failed to update employee: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// DELETE /employees/{id}
#[tracing::instrument(skip(state, auth))]
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let owner_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => return not_found(),
    };

    match EmployeeRepo::remove(&state.pool, owner_id, id).await {
        Ok(0) => not_found(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete employee: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_parses_camel_case() {
        let req: CreateEmployeeRequest = serde_json::from_value(json!({
            "name": "Bob",
            "address": "Rua A, 123",
            "zipCode": "01001-000",
            "role": "QA",
            "salary": 5000,
            "contractDate": "2025-01-15",
        }))
        .unwrap();
        assert_eq!(req.name, "Bob");
        assert_eq!(req.zip_code.as_deref(), Some("01001-000"));
        assert_eq!(req.salary, Decimal::new(5000, 0));
        assert_eq!(
            req.contract_date,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(req.neighborhood.is_none());
        assert!(req.phone.is_none());
    }

    #[test]
    fn test_create_request_ignores_client_owner_id() {
        // An ownerId in the payload has nowhere to land
        let req: CreateEmployeeRequest = serde_json::from_value(json!({
            "name": "Bob",
            "address": "Rua A, 123",
            "role": "QA",
            "salary": "5000.50",
            "contractDate": "2025-01-15",
            "ownerId": "b9f1d4c2-0000-0000-0000-000000000000",
        }))
        .unwrap();
        assert_eq!(req.name, "Bob");
        assert_eq!(req.salary, Decimal::new(500050, 2));
    }

    #[test]
    fn test_create_request_missing_required_field_fails() {
        let result = serde_json::from_value::<CreateEmployeeRequest>(json!({
            "name": "Bob",
            "role": "QA",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_empty_body_means_no_changes() {
        let req: UpdateEmployeeRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.name.is_none());
        assert!(req.salary.is_none());
        assert!(req.contract_date.is_none());
    }
}
