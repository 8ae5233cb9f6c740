//! SDK resource modules
//!
//! This module contains resource-specific clients for interacting with
//! upstream endpoints.

pub mod employees;

pub use employees::EmployeesClient;
