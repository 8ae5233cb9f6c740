//! Employees resource client
//!
//! This module provides the employee operations and the read-only queries
//! derived from the employee listing.

use crate::client::HttpClient;
use crate::error::{SdkError, SdkResult};
use crate::queries;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Client for employee operations
#[derive(Debug, Clone)]
pub struct EmployeesClient {
    client: Arc<HttpClient>,
}

impl EmployeesClient {
    /// Create a new employees client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List every employee.
    ///
    /// Lenient: an absent payload or any failure yields an empty list, except
    /// rate-limit exhaustion, which is returned as an error.
    pub async fn list(&self) -> SdkResult<Vec<Employee>> {
        debug!("Fetching all employees");

        match self.client.send::<Vec<Employee>, ()>(Method::GET, "", None).await {
            Ok(envelope) => Ok(envelope.data.unwrap_or_default()),
            Err(e @ SdkError::RateLimitExhausted { .. }) => Err(e),
            Err(e) => {
                warn!("Failed to fetch employees, returning an empty list: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Get an employee by ID
    pub async fn get(&self, id: &str) -> SdkResult<Employee> {
        debug!("Fetching employee by ID: {}", id);

        // Empty and dot segments would address the listing endpoint
        if matches!(id.trim(), "" | "." | "..") {
            return Err(SdkError::employee_not_found(id));
        }

        let envelope = self
            .client
            .send::<Employee, ()>(Method::GET, id, None)
            .await
            .map_err(|e| match e {
                SdkError::NotFound { .. } => SdkError::employee_not_found(id),
                other => other,
            })?;

        envelope.data.ok_or_else(|| {
            SdkError::EmptyPayload(format!("no employee data returned for ID {}", id))
        })
    }

    /// Create a new employee
    pub async fn create(&self, input: &CreateEmployeeInput) -> SdkResult<Employee> {
        info!("Creating employee: {}", input.name);

        let envelope = self
            .client
            .send::<Employee, _>(Method::POST, "", Some(input))
            .await?;

        envelope.data.ok_or_else(|| {
            SdkError::EmptyPayload(format!("no employee returned after creating {}", input.name))
        })
    }

    /// Delete an employee by ID and return the deleted employee's name.
    ///
    /// The upstream deletes by name, so the ID is resolved first. Any failure
    /// to resolve it, not-found included, stops the workflow before a DELETE
    /// is sent.
    pub async fn delete(&self, id: &str) -> SdkResult<String> {
        let name = self.get(id).await?.name;

        info!("Deleting employee: {} (ID: {})", name, id);

        let body = DeleteEmployeeInput { name };
        let envelope = match self
            .client
            .send::<bool, _>(Method::DELETE, "", Some(&body))
            .await
        {
            Ok(envelope) => envelope,
            // Not-found only means something for the lookup; here it is a failed delete
            Err(SdkError::NotFound { .. }) => {
                warn!("Upstream could not find {} to delete (ID: {})", body.name, id);
                return Err(SdkError::DeleteRejected { name: body.name });
            }
            Err(e) => return Err(e),
        };

        if envelope.data == Some(true) {
            Ok(body.name)
        } else {
            Err(SdkError::DeleteRejected { name: body.name })
        }
    }

    /// Employees whose name contains `fragment`, ignoring case.
    ///
    /// A missing or blank fragment returns an empty list without calling the
    /// upstream.
    pub async fn search_by_name(&self, fragment: Option<&str>) -> SdkResult<Vec<Employee>> {
        let fragment = match fragment {
            Some(f) if !f.trim().is_empty() => f,
            _ => return Ok(Vec::new()),
        };

        let employees = self.list().await?;
        Ok(queries::search_by_name(&employees, fragment))
    }

    /// Highest salary across all employees, 0 when there are none
    pub async fn max_salary(&self) -> SdkResult<u64> {
        let employees = self.list().await?;
        Ok(queries::max_salary(&employees))
    }

    /// Names of the best paid employees, highest first, at most 10
    pub async fn top_earning_names(&self, limit: usize) -> SdkResult<Vec<String>> {
        let employees = self.list().await?;
        Ok(queries::top_earning_names(&employees, limit))
    }

    /// Names of the ten best paid employees
    pub async fn top_ten_earning_names(&self) -> SdkResult<Vec<String>> {
        self.top_earning_names(queries::TOP_EARNERS_LIMIT).await
    }
}

/// Employee entity as served by the upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    #[serde(rename = "employee_name")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    pub salary: u64,
    #[serde(rename = "employee_age", default)]
    pub age: Option<u32>,
    #[serde(rename = "employee_title", default)]
    pub title: Option<String>,
    #[serde(rename = "employee_email", default)]
    pub email: Option<String>,
}

/// Request to create a new employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub salary: u64,
    pub age: u32,
    pub title: String,
}

impl CreateEmployeeInput {
    /// Create a new employee request
    pub fn new(name: impl Into<String>, salary: u64, age: u32, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            salary,
            age,
            title: title.into(),
        }
    }
}

/// Body of the upstream delete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}
