use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use employee_sdk::{CreateEmployeeInput, SdkError};
use tracing::{error, info};
use validator::Validate;

use crate::{dto::*, error::ApiResult, AppState};

pub async fn list(State(state): State<AppState>) -> (StatusCode, Json<Vec<Employee>>) {
    info!("Retrieving all employees");

    match state.employees.list().await {
        Ok(employees) => (StatusCode::OK, Json(employees)),
        Err(e) => {
            error!("Error retrieving all employees: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> (StatusCode, Json<Vec<Employee>>) {
    info!("Searching employees by name fragment: {}", fragment);

    match state.employees.search_by_name(Some(&fragment)).await {
        Ok(employees) => (StatusCode::OK, Json(employees)),
        Err(e) => {
            error!("Error searching employees: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    info!("Retrieving employee {}", id);

    let employee = state.employees.get(&id).await?;
    Ok(Json(employee))
}

pub async fn highest_salary(State(state): State<AppState>) -> (StatusCode, Json<u64>) {
    info!("Calculating highest employee salary");

    match state.employees.max_salary().await {
        Ok(salary) => (StatusCode::OK, Json(salary)),
        Err(e) => {
            error!("Error calculating highest salary: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(0))
        }
    }
}

pub async fn top_ten_earning_names(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<String>>) {
    info!("Retrieving top ten earning employee names");

    match state.employees.top_ten_earning_names().await {
        Ok(names) => (StatusCode::OK, Json(names)),
        Err(e) => {
            error!("Error retrieving top earners: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    payload.validate()?;

    info!("Creating employee {}", payload.name);

    let input = CreateEmployeeInput::from(payload);
    let employee = state.employees.create(&input).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("Deleting employee {}", id);

    match state.employees.delete(&id).await {
        Ok(name) => (StatusCode::OK, name).into_response(),
        Err(SdkError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            "Employee not found for deletion.",
        )
            .into_response(),
        Err(e) => {
            error!("Error deleting employee {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete employee.").into_response()
        }
    }
}
