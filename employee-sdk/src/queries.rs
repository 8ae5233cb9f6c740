//! Read-only computations over an employee listing
//!
//! These never talk to the upstream; `EmployeesClient` feeds them the result
//! of a single list call.

use crate::resources::employees::Employee;

/// Largest number of names `top_earning_names` ever returns
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `fragment`, ignoring case.
///
/// A blank fragment matches nothing.
pub fn search_by_name(employees: &[Employee], fragment: &str) -> Vec<Employee> {
    if fragment.trim().is_empty() {
        return Vec::new();
    }

    let needle = fragment.to_lowercase();
    employees
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Highest salary in the listing, 0 when empty
pub fn max_salary(employees: &[Employee]) -> u64 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the best paid employees, highest salary first.
///
/// Equal salaries keep their listing order. `limit` is capped at
/// [`TOP_EARNERS_LIMIT`].
pub fn top_earning_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.salary.cmp(&a.salary));

    ranked
        .into_iter()
        .take(limit.min(TOP_EARNERS_LIMIT))
        .map(|e| e.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn employee(name: &str, salary: u64) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            salary,
            age: Some(30),
            title: Some("Engineer".to_string()),
            email: None,
        }
    }

    fn alice_and_bob() -> Vec<Employee> {
        vec![employee("Alice Smith", 60000), employee("Bob Johnson", 120000)]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let results = search_by_name(&alice_and_bob(), "aLiCe");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Alice Smith");
    }

    #[test]
    fn test_search_matches_substring_anywhere() {
        let results = search_by_name(&alice_and_bob(), "SON");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Bob Johnson");
    }

    #[test]
    fn test_blank_search_matches_nothing() {
        assert!(search_by_name(&alice_and_bob(), "").is_empty());
        assert!(search_by_name(&alice_and_bob(), "   ").is_empty());
    }

    #[test]
    fn test_max_salary() {
        assert_eq!(max_salary(&[]), 0);
        assert_eq!(max_salary(&alice_and_bob()), 120000);
    }

    #[test]
    fn test_top_earners_ordering() {
        assert_eq!(
            top_earning_names(&alice_and_bob(), 10),
            vec!["Bob Johnson".to_string(), "Alice Smith".to_string()]
        );
    }

    #[test]
    fn test_top_earners_capped_at_ten() {
        let employees: Vec<Employee> = (0..12)
            .map(|i| employee(&format!("Emp{i}"), 100_000 + 1000 * i))
            .collect();

        let names = top_earning_names(&employees, 50);

        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Emp11");
        assert_eq!(names[9], "Emp2");
    }

    #[test]
    fn test_top_earners_ties_keep_listing_order() {
        let employees = vec![
            employee("First", 50_000),
            employee("Rich", 90_000),
            employee("Second", 50_000),
            employee("Third", 50_000),
        ];

        assert_eq!(
            top_earning_names(&employees, 3),
            vec!["Rich".to_string(), "First".to_string(), "Second".to_string()]
        );
    }

    #[test]
    fn test_top_earners_zero_limit() {
        assert!(top_earning_names(&alice_and_bob(), 0).is_empty());
    }
}
