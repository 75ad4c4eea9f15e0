use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::Connection;
use tracing::{debug, error, warn};

use crate::db::{ConnectionProvider, DbError};

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

/// ===============================
/// SQL text plus positional values
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, values: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            values,
        }
    }
}

#[derive(Debug)]
pub enum QueryOutput {
    Rows(Vec<MySqlRow>),
    Written { rows_affected: u64 },
}

impl QueryOutput {
    pub fn into_rows(self) -> Result<Vec<MySqlRow>, DbError> {
        match self {
            QueryOutput::Rows(rows) => Ok(rows),
            QueryOutput::Written { .. } => Err(DbError::Unexpected(
                "statement returned no result set".to_string(),
            )),
        }
    }

    pub fn into_rows_affected(self) -> Result<u64, DbError> {
        match self {
            QueryOutput::Written { rows_affected } => Ok(rows_affected),
            QueryOutput::Rows(_) => Err(DbError::Unexpected(
                "statement was not executed as a write".to_string(),
            )),
        }
    }
}

/// ===============================
/// Runs one statement on a fresh connection
/// ===============================
#[derive(Clone)]
pub struct QueryExecutor {
    provider: ConnectionProvider,
}

impl QueryExecutor {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// `fetch` returns every row; otherwise the statement is committed and
    /// the affected row count returned. The connection is closed on every path.
    pub async fn execute(&self, statement: &Statement, fetch: bool) -> Result<QueryOutput, DbError> {
        let mut conn = self.provider.acquire().await?;

        debug!(sql = %statement.sql, params = statement.values.len(), fetch, "Executing statement");
        let result = run(&mut conn, statement, fetch).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection");
        }

        result.map_err(|e| {
            let err = DbError::from(e);
            error!(error = %err, sql = %statement.sql, "Statement failed");
            err
        })
    }
}

async fn run(
    conn: &mut MySqlConnection,
    statement: &Statement,
    fetch: bool,
) -> Result<QueryOutput, sqlx::Error> {
    if fetch {
        let rows = bind_values(sqlx::query(&statement.sql), &statement.values)
            .fetch_all(&mut *conn)
            .await?;
        return Ok(QueryOutput::Rows(rows));
    }

    let mut tx = conn.begin().await?;
    let done = bind_values(sqlx::query(&statement.sql), &statement.values)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(QueryOutput::Written {
        rows_affected: done.rows_affected(),
    })
}

fn bind_values<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: &'q [SqlValue],
) -> Query<'q, MySql, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::String(v) => query.bind(v.as_str()),
            SqlValue::I64(v) => query.bind(*v),
            SqlValue::F64(v) => query.bind(*v),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_output_has_no_rows() {
        let out = QueryOutput::Written { rows_affected: 1 };
        assert!(matches!(out.into_rows(), Err(DbError::Unexpected(_))));
    }

    #[test]
    fn rows_output_has_no_affected_count() {
        let out = QueryOutput::Rows(Vec::new());
        assert!(matches!(out.into_rows_affected(), Err(DbError::Unexpected(_))));
    }

    #[test]
    fn values_convert_from_primitives() {
        let stmt = Statement::new(
            "SELECT ? , ?, ?",
            vec!["a".into(), 7i64.into(), 1.5f64.into()],
        );
        assert_eq!(
            stmt.values,
            vec![
                SqlValue::String("a".to_string()),
                SqlValue::I64(7),
                SqlValue::F64(1.5)
            ]
        );
    }
}
