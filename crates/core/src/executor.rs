use crate::dialect::Dialect;
use crate::driver::Driver;
use crate::result_set::ResultSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success(ResultSet),
    Failure(String),
}

pub async fn execute<D: Driver>(driver: &D, sql: &str) -> ExecutionOutcome {
    let mut rows = match driver.run_query(sql).await {
        Ok(rows) => rows,
        Err(error) => return ExecutionOutcome::Failure(error.to_string()),
    };

    let mut result = ResultSet::new(rows.columns().to_vec());
    loop {
        match rows.next_row().await {
            Ok(Some(row)) => {
                if let Err(error) = result.push_row(row) {
                    return ExecutionOutcome::Failure(error.to_string());
                }
            }
            Ok(None) => break,
            Err(error) => return ExecutionOutcome::Failure(error.to_string()),
        }
    }

    ExecutionOutcome::Success(result)
}

pub async fn select_table_contents<D: Driver>(driver: &D, table: &str) -> ExecutionOutcome {
    let Some(dialect) = Dialect::from_name(driver.dialect()) else {
        return ExecutionOutcome::Failure(format!("unsupported dialect `{}`", driver.dialect()));
    };
    execute(driver, &dialect.select_all_statement(table)).await
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};

    use super::{execute, select_table_contents, ExecutionOutcome};
    use crate::dialect::Dialect;
    use crate::driver::{Driver, DriverError, QueryRows, RowStream};

    #[derive(Debug, Clone, Default)]
    struct FakeDriver {
        dialect: &'static str,
        responses: HashMap<String, (Vec<String>, Vec<Vec<String>>)>,
        failures: HashMap<String, String>,
    }

    impl FakeDriver {
        fn mysql() -> Self {
            Self {
                dialect: "mysql",
                ..Self::default()
            }
        }

        fn with_response(
            mut self,
            sql: &str,
            columns: &[&str],
            rows: &[&[&str]],
        ) -> Self {
            self.responses.insert(
                sql.to_string(),
                (
                    columns.iter().map(|c| (*c).to_string()).collect(),
                    rows.iter()
                        .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                        .collect(),
                ),
            );
            self
        }

        fn with_failure(mut self, sql: &str, message: &str) -> Self {
            self.failures.insert(sql.to_string(), message.to_string());
            self
        }
    }

    #[derive(Debug)]
    struct FakeRows {
        rows: VecDeque<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl RowStream for FakeRows {
        async fn next_row(&mut self) -> Result<Option<Vec<String>>, DriverError> {
            Ok(self.rows.pop_front())
        }
    }

    #[async_trait::async_trait]
    impl Driver for FakeDriver {
        type Rows = FakeRows;

        fn dialect(&self) -> &str {
            self.dialect
        }

        async fn run_query(&self, sql: &str) -> Result<QueryRows<FakeRows>, DriverError> {
            if let Some(message) = self.failures.get(sql) {
                return Err(DriverError::new(message.clone()));
            }
            let (columns, rows) = self
                .responses
                .get(sql)
                .cloned()
                .ok_or_else(|| DriverError::new(format!("unexpected statement: {sql}")))?;
            Ok(QueryRows::new(
                columns,
                FakeRows {
                    rows: rows.into_iter().collect(),
                },
            ))
        }
    }

    #[tokio::test]
    async fn success_materializes_every_row_before_returning() {
        let driver = FakeDriver::mysql().with_response(
            "SELECT id, name FROM users",
            &["id", "name"],
            &[&["1", "a"], &["2", "b"]],
        );

        let outcome = execute(&driver, "SELECT id, name FROM users").await;

        let ExecutionOutcome::Success(result) = outcome else {
            panic!("expected success");
        };
        assert_eq!(result.columns(), ["id".to_string(), "name".to_string()]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows()[1], vec!["2".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn driver_failure_becomes_failure_with_the_driver_message() {
        let driver = FakeDriver::mysql().with_failure("SELEC 1", "syntax error");

        let outcome = execute(&driver, "SELEC 1").await;

        assert_eq!(outcome, ExecutionOutcome::Failure("syntax error".to_string()));
    }

    #[tokio::test]
    async fn ragged_driver_rows_fail_the_whole_execution() {
        let driver = FakeDriver::mysql().with_response(
            "SELECT id, name FROM users",
            &["id", "name"],
            &[&["1", "a"], &["2"]],
        );

        let outcome = execute(&driver, "SELECT id, name FROM users").await;

        assert!(matches!(outcome, ExecutionOutcome::Failure(_)));
    }

    #[tokio::test]
    async fn empty_result_keeps_the_column_list() {
        let driver =
            FakeDriver::mysql().with_response("SELECT id FROM empty_table", &["id"], &[]);

        let outcome = execute(&driver, "SELECT id FROM empty_table").await;

        let ExecutionOutcome::Success(result) = outcome else {
            panic!("expected success");
        };
        assert!(result.is_empty());
        assert_eq!(result.columns(), ["id".to_string()]);
    }

    #[tokio::test]
    async fn drill_down_matches_a_directly_submitted_statement() {
        let statement = Dialect::Mysql.select_all_statement("orders");
        let driver = FakeDriver::mysql().with_response(
            &statement,
            &["id", "total"],
            &[&["7", "19.99"]],
        );

        let direct = execute(&driver, &statement).await;
        let drilled = select_table_contents(&driver, "orders").await;

        assert_eq!(direct, drilled);
        assert!(matches!(drilled, ExecutionOutcome::Success(_)));
    }
}
