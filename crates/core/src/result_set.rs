use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultSetError {
    #[error("row has {actual} cells, expected {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultSet {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), ResultSetError> {
        if row.len() != self.columns.len() {
            return Err(ResultSetError::WidthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ResultSet, ResultSetError};

    fn columns() -> Vec<String> {
        vec!["id".to_string(), "name".to_string()]
    }

    #[test]
    fn accepts_rows_matching_the_column_count() {
        let mut result = ResultSet::new(columns());
        result
            .push_row(vec!["1".to_string(), "a".to_string()])
            .expect("row should be accepted");

        assert_eq!(result.row_count(), 1);
        assert_eq!(result.rows()[0], vec!["1".to_string(), "a".to_string()]);
    }

    #[test]
    fn rejects_rows_of_the_wrong_width() {
        let mut result = ResultSet::new(columns());
        let err = result
            .push_row(vec!["1".to_string()])
            .expect_err("short row should be rejected");

        assert_eq!(
            err,
            ResultSetError::WidthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(result.is_empty());
    }

    #[test]
    fn zero_rows_with_columns_is_valid() {
        let result = ResultSet::new(columns());
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), 2);
    }
}
