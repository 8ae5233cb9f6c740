use employee_sdk::CreateEmployeeInput;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub use employee_sdk::Employee;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1))]
    pub salary: u64,
    #[validate(range(min = 16, max = 75))]
    pub age: u32,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
}

impl From<CreateEmployeeRequest> for CreateEmployeeInput {
    fn from(request: CreateEmployeeRequest) -> Self {
        CreateEmployeeInput::new(request.name, request.salary, request.age, request.title)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, salary: u64, age: u32, title: &str) -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            name: name.to_string(),
            salary,
            age,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("New Hire", 50000, 25, "Associate").validate().is_ok());
    }

    #[test]
    fn test_invalid_requests() {
        assert!(request("  ", 50000, 25, "Associate").validate().is_err());
        assert!(request("New Hire", 0, 25, "Associate").validate().is_err());
        assert!(request("New Hire", 50000, 15, "Associate").validate().is_err());
        assert!(request("New Hire", 50000, 76, "Associate").validate().is_err());
        assert!(request("New Hire", 50000, 25, "").validate().is_err());
    }

    #[test]
    fn test_into_create_input() {
        let input: CreateEmployeeInput = request("New Hire", 50000, 25, "Associate").into();
        assert_eq!(input, CreateEmployeeInput::new("New Hire", 50000, 25, "Associate"));
    }
}
