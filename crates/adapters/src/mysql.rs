use async_trait::async_trait;
use futures_util::StreamExt;
use mysql_async::prelude::Query;
use mysql_async::{OptsBuilder, Pool, ResultSetStream, Row, TextProtocol, Value};
use sqlpane_core::driver::{Driver, DriverError, QueryRows, RowStream};
use sqlpane_core::profiles::ConnectionProfile;

#[derive(Debug, Clone)]
pub struct MysqlDriver {
    pool: Pool,
}

impl MysqlDriver {
    #[must_use]
    pub fn from_profile(profile: &ConnectionProfile) -> Self {
        Self {
            pool: Pool::new(opts_from_profile(profile, password_from_env().as_deref())),
        }
    }

    pub async fn disconnect(&self) -> Result<(), mysql_async::Error> {
        self.pool.clone().disconnect().await
    }
}

#[derive(Debug)]
pub struct MysqlRows {
    stream: Option<ResultSetStream<'static, 'static, 'static, Row, TextProtocol>>,
}

#[async_trait]
impl RowStream for MysqlRows {
    async fn next_row(&mut self) -> Result<Option<Vec<String>>, DriverError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };

        match stream.next().await {
            Some(Ok(row)) => Ok(Some(row_to_values(row))),
            Some(Err(error)) => Err(to_driver_error(error)),
            None => {
                self.stream = None;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Driver for MysqlDriver {
    type Rows = MysqlRows;

    fn dialect(&self) -> &str {
        "mysql"
    }

    async fn run_query(&self, sql: &str) -> Result<QueryRows<Self::Rows>, DriverError> {
        let stream = sql
            .to_string()
            .stream::<Row, _>(self.pool.clone())
            .await
            .map_err(to_driver_error)?;

        let columns = stream
            .columns_ref()
            .iter()
            .map(|column| column.name_str().into_owned())
            .collect();

        Ok(QueryRows::new(
            columns,
            MysqlRows {
                stream: Some(stream),
            },
        ))
    }
}

fn opts_from_profile(profile: &ConnectionProfile, password: Option<&str>) -> OptsBuilder {
    let mut builder = OptsBuilder::default()
        .ip_or_hostname(profile.host.clone())
        .tcp_port(profile.port)
        .user(Some(profile.user.clone()));

    if let Some(password) = password {
        builder = builder.pass(Some(password.to_string()));
    }

    if let Some(database) = &profile.database {
        builder = builder.db_name(Some(database.clone()));
    }

    builder
}

fn password_from_env() -> Option<String> {
    std::env::var("SQLPANE_DB_PASSWORD")
        .ok()
        .filter(|password| !password.is_empty())
}

fn row_to_values(row: Row) -> Vec<String> {
    row.unwrap().into_iter().map(value_to_display).collect()
}

fn value_to_display(value: Value) -> String {
    match value {
        Value::NULL => "NULL".to_string(),
        Value::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Value::Int(value) => value.to_string(),
        Value::UInt(value) => value.to_string(),
        Value::Float(value) => value.to_string(),
        Value::Double(value) => value.to_string(),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            let mut rendered = format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            );
            if micros > 0 {
                rendered.push_str(&format!(".{micros:06}"));
            }
            rendered
        }
        Value::Time(is_negative, days, hours, minutes, seconds, micros) => {
            let sign = if is_negative { "-" } else { "" };
            let total_hours = u64::from(days) * 24 + u64::from(hours);
            let mut rendered = format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}");
            if micros > 0 {
                rendered.push_str(&format!(".{micros:06}"));
            }
            rendered
        }
    }
}

fn to_driver_error(error: mysql_async::Error) -> DriverError {
    DriverError::new(error.to_string())
}
