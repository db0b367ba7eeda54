use thiserror::Error;

use crate::dialect::Dialect;
use crate::driver::{Driver, DriverError};
use crate::surface::TextSurface;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported dialect `{0}`")]
    UnsupportedDialect(String),
    #[error("catalog query failed: {0}")]
    Query(#[source] DriverError),
    #[error("catalog row is missing a table name column")]
    MissingNameColumn,
}

pub async fn load_tables<D: Driver>(
    driver: &D,
    tables: &mut TextSurface,
) -> Result<Vec<String>, CatalogError> {
    let dialect = Dialect::from_name(driver.dialect())
        .ok_or_else(|| CatalogError::UnsupportedDialect(driver.dialect().to_string()))?;

    let mut rows = driver
        .run_query(dialect.catalog_statement())
        .await
        .map_err(CatalogError::Query)?;

    // Accumulate before touching the surface; a scan failure discards everything.
    let mut names = Vec::new();
    while let Some(row) = rows.next_row().await.map_err(CatalogError::Query)? {
        let name = row
            .into_iter()
            .next()
            .ok_or(CatalogError::MissingNameColumn)?;
        names.push(name);
    }

    tables.clear();
    for name in &names {
        tables.append_line(name.clone());
    }

    Ok(names)
}
