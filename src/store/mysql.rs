use async_trait::async_trait;
use sqlx::FromRow;

use crate::db::DbError;
use crate::model::employee::{Column, Employee, EmployeeInput, TABLE};
use crate::store::EmployeeStore;
use crate::utils::db_utils::{QueryExecutor, SqlValue, Statement};

pub struct MySqlEmployeeStore {
    executor: QueryExecutor,
}

impl MySqlEmployeeStore {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DbError> {
        let rows = self
            .executor
            .execute(&email_check_statement(email, exclude_id), true)
            .await?
            .into_rows()?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, input: &EmployeeInput) -> Result<u64, DbError> {
        self.executor
            .execute(&insert_statement(input), false)
            .await?
            .into_rows_affected()
    }

    async fn update(&self, id: i64, input: &EmployeeInput) -> Result<u64, DbError> {
        self.executor
            .execute(&update_statement(id, input), false)
            .await?
            .into_rows_affected()
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        self.executor
            .execute(&delete_statement(id), false)
            .await?
            .into_rows_affected()
    }

    async fn load_all(&self) -> Result<Vec<Employee>, DbError> {
        let rows = self
            .executor
            .execute(&select_all_statement(), true)
            .await?
            .into_rows()?;

        rows.iter()
            .map(|row| Employee::from_row(row).map_err(|e| DbError::Unexpected(e.to_string())))
            .collect()
    }
}

fn input_values(input: &EmployeeInput) -> Vec<SqlValue> {
    vec![
        input.name.as_str().into(),
        input.email.as_str().into(),
        input.phone.as_str().into(),
        input.department.as_str().into(),
        input.role.as_str().into(),
        input.salary.into(),
        input.country.as_str().into(),
    ]
}

fn email_check_statement(email: &str, exclude_id: Option<i64>) -> Statement {
    let mut sql = format!(
        "SELECT {} FROM {TABLE} WHERE {} = ?",
        Column::Id.quoted(),
        Column::Email.quoted()
    );
    let mut values = vec![SqlValue::from(email)];

    if let Some(id) = exclude_id {
        sql.push_str(&format!(" AND {} != ?", Column::Id.quoted()));
        values.push(id.into());
    }

    Statement::new(sql, values)
}

fn insert_statement(input: &EmployeeInput) -> Statement {
    let columns = Column::writable()
        .map(Column::quoted)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; Column::writable().count()].join(", ");

    Statement::new(
        format!("INSERT INTO {TABLE} ({columns}) VALUES ({placeholders})"),
        input_values(input),
    )
}

fn update_statement(id: i64, input: &EmployeeInput) -> Statement {
    let set_clause = Column::writable()
        .map(|c| format!("{} = ?", c.quoted()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut values = input_values(input);
    values.push(id.into());

    Statement::new(
        format!(
            "UPDATE {TABLE} SET {set_clause} WHERE {} = ?",
            Column::Id.quoted()
        ),
        values,
    )
}

fn delete_statement(id: i64) -> Statement {
    Statement::new(
        format!("DELETE FROM {TABLE} WHERE {} = ?", Column::Id.quoted()),
        vec![id.into()],
    )
}

fn select_all_statement() -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {TABLE} ORDER BY {}",
            Column::select_list(),
            Column::Id.quoted()
        ),
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            name: "Paul Engone".to_string(),
            email: "paul@x.com".to_string(),
            phone: "+24160000000".to_string(),
            department: "IT".to_string(),
            role: "Developer".to_string(),
            salary: 500_000.0,
            country: "Gabon".to_string(),
        }
    }

    #[test]
    fn email_check_binds_email() {
        let stmt = email_check_statement("paul@x.com", None);
        assert_eq!(
            stmt.sql,
            "SELECT `id` FROM employees_codon WHERE `Email` = ?"
        );
        assert_eq!(stmt.values, vec![SqlValue::String("paul@x.com".to_string())]);
    }

    #[test]
    fn email_check_can_exclude_a_record() {
        let stmt = email_check_statement("paul@x.com", Some(3));
        assert_eq!(
            stmt.sql,
            "SELECT `id` FROM employees_codon WHERE `Email` = ? AND `id` != ?"
        );
        assert_eq!(stmt.values[1], SqlValue::I64(3));
    }

    #[test]
    fn insert_uses_placeholders_only() {
        let stmt = insert_statement(&EmployeeInput {
            name: "Robert'); DROP TABLE employees_codon;--".to_string(),
            ..input()
        });

        assert_eq!(
            stmt.sql,
            "INSERT INTO employees_codon (`Nom`, `Email`, `Téléphone`, `Département`, `Poste`, `Salaire`, `Pays`) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        );
        assert!(!stmt.sql.contains("DROP"));
        assert_eq!(stmt.values.len(), 7);
        assert_eq!(stmt.values[5], SqlValue::F64(500_000.0));
    }

    #[test]
    fn update_keys_on_id_last() {
        let stmt = update_statement(42, &input());

        assert!(stmt.sql.starts_with("UPDATE employees_codon SET `Nom` = ?, `Email` = ?"));
        assert!(stmt.sql.ends_with("WHERE `id` = ?"));
        assert_eq!(stmt.values.len(), 8);
        assert_eq!(stmt.values.last(), Some(&SqlValue::I64(42)));
    }

    #[test]
    fn delete_and_select() {
        let stmt = delete_statement(7);
        assert_eq!(stmt.sql, "DELETE FROM employees_codon WHERE `id` = ?");
        assert_eq!(stmt.values, vec![SqlValue::I64(7)]);

        let stmt = select_all_statement();
        assert!(stmt.sql.starts_with("SELECT `id`, `Nom`"));
        assert!(stmt.sql.contains("CAST(`Salaire` AS DOUBLE) AS `Salaire`, `Pays`"));
        assert!(stmt.sql.ends_with("FROM employees_codon ORDER BY `id`"));
        assert!(stmt.values.is_empty());
    }
}
