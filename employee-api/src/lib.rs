//! HTTP routing layer for the employee facade
//!
//! Exposes the [`employee_sdk::EmployeesClient`] operations as JSON routes.
//! The binary nests [`routes`] under `/api/v1/employee`.

use axum::{
    routing::get,
    Router,
};
use employee_sdk::EmployeesClient;

pub mod dto;
pub mod error;
pub mod handlers;

pub use dto::*;
pub use error::{ApiError, ApiResult};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub employees: EmployeesClient,
}

impl AppState {
    pub fn new(employees: EmployeesClient) -> Self {
        Self { employees }
    }
}

/// Build the employee router
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::employees::list).post(handlers::employees::create),
        )
        .route("/search/:fragment", get(handlers::employees::search))
        .route("/highestSalary", get(handlers::employees::highest_salary))
        .route(
            "/topTenHighestEarningEmployeeNames",
            get(handlers::employees::top_ten_earning_names),
        )
        .route(
            "/:id",
            get(handlers::employees::get).delete(handlers::employees::delete),
        )
        .with_state(state)
}
