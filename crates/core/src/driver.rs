use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait RowStream: Send {
    async fn next_row(&mut self) -> Result<Option<Vec<String>>, DriverError>;
}

#[derive(Debug)]
pub struct QueryRows<S> {
    columns: Vec<String>,
    rows: S,
}

impl<S: RowStream> QueryRows<S> {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: S) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub async fn next_row(&mut self) -> Result<Option<Vec<String>>, DriverError> {
        self.rows.next_row().await
    }
}

#[async_trait]
pub trait Driver {
    type Rows: RowStream + Send;

    fn dialect(&self) -> &str;

    async fn run_query(&self, sql: &str) -> Result<QueryRows<Self::Rows>, DriverError>;
}
