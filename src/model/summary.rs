use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;

const TOP_GROUPS: usize = 10;
const RECENT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GroupStats {
    #[schema(example = "IT")]
    pub name: String,
    #[schema(example = 12)]
    pub count: usize,
    #[schema(example = 650000.0)]
    pub mean_salary: f64,
    #[schema(example = 300000.0)]
    pub min_salary: f64,
    #[schema(example = 1200000.0)]
    pub max_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    pub total: usize,
    pub average_salary: f64,
    pub departments: usize,
    pub countries: usize,
    pub roles: usize,
    /// Every department, by name.
    pub by_department: Vec<GroupStats>,
    /// Ten largest countries by head count.
    pub top_countries: Vec<GroupStats>,
    /// Ten best-paid roles by mean salary.
    pub top_roles: Vec<GroupStats>,
    /// Most recently added records, newest first.
    pub recent: Vec<Employee>,
}

impl Summary {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let total = employees.len();
        let average_salary = if total == 0 {
            0.0
        } else {
            employees.iter().map(|e| e.salary).sum::<f64>() / total as f64
        };

        let mut top_countries = group_by(employees, |e| &e.country);
        top_countries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        top_countries.truncate(TOP_GROUPS);

        let mut top_roles = group_by(employees, |e| &e.role);
        top_roles.sort_by(|a, b| {
            b.mean_salary
                .total_cmp(&a.mean_salary)
                .then_with(|| a.name.cmp(&b.name))
        });
        top_roles.truncate(TOP_GROUPS);

        let mut recent: Vec<Employee> = employees.to_vec();
        recent.sort_by(|a, b| b.id.cmp(&a.id));
        recent.truncate(RECENT);

        Self {
            total,
            average_salary,
            departments: distinct(employees, |e| &e.department),
            countries: distinct(employees, |e| &e.country),
            roles: distinct(employees, |e| &e.role),
            by_department: group_by(employees, |e| &e.department),
            top_countries,
            top_roles,
            recent,
        }
    }
}

fn distinct(employees: &[Employee], key: fn(&Employee) -> &String) -> usize {
    employees.iter().map(key).collect::<BTreeSet<_>>().len()
}

/// Groups sorted by name.
fn group_by(employees: &[Employee], key: fn(&Employee) -> &String) -> Vec<GroupStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for employee in employees {
        groups.entry(key(employee).as_str()).or_default().push(employee.salary);
    }

    groups
        .into_iter()
        .map(|(name, salaries)| GroupStats {
            name: name.to_string(),
            count: salaries.len(),
            mean_salary: salaries.iter().sum::<f64>() / salaries.len() as f64,
            min_salary: salaries.iter().copied().fold(f64::INFINITY, f64::min),
            max_salary: salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, department: &str, role: &str, country: &str, salary: f64) -> Employee {
        Employee {
            id,
            name: format!("Employee {id}"),
            email: format!("e{id}@corp.com"),
            phone: "+24160000000".to_string(),
            department: department.to_string(),
            role: role.to_string(),
            salary,
            country: country.to_string(),
        }
    }

    #[test]
    fn empty_table() {
        let summary = Summary::from_employees(&[]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_salary, 0.0);
        assert!(summary.by_department.is_empty());
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn aggregates_by_department_country_and_role() {
        let rows = vec![
            employee(1, "IT", "Developer", "Gabon", 400.0),
            employee(2, "IT", "Manager", "Gabon", 800.0),
            employee(3, "HR", "Manager", "Cameroon", 600.0),
            employee(4, "Finance", "Analyst", "Gabon", 200.0),
        ];
        let summary = Summary::from_employees(&rows);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.average_salary, 500.0);
        assert_eq!(summary.departments, 3);
        assert_eq!(summary.countries, 2);
        assert_eq!(summary.roles, 3);

        let names: Vec<&str> = summary.by_department.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Finance", "HR", "IT"]);

        let it = &summary.by_department[2];
        assert_eq!(it.count, 2);
        assert_eq!(it.mean_salary, 600.0);
        assert_eq!(it.min_salary, 400.0);
        assert_eq!(it.max_salary, 800.0);

        assert_eq!(summary.top_countries[0].name, "Gabon");
        assert_eq!(summary.top_countries[0].count, 3);

        assert_eq!(summary.top_roles[0].name, "Manager");
        assert_eq!(summary.top_roles[0].mean_salary, 700.0);
    }

    #[test]
    fn recent_keeps_five_highest_ids() {
        let rows: Vec<Employee> = (1..=8)
            .map(|id| employee(id, "IT", "Developer", "Gabon", 100.0))
            .collect();
        let ids: Vec<i64> = Summary::from_employees(&rows)
            .recent
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, [8, 7, 6, 5, 4]);
    }
}
