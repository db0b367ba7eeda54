use thiserror::Error;

use crate::catalog::{self, CatalogError};
use crate::driver::Driver;
use crate::executor::{self, ExecutionOutcome};
use crate::render::render_result_table;
use crate::result_set::ResultSet;
use crate::surface::TextSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Tables,
    Query,
    Results,
}

impl PanelFocus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Tables => Self::Query,
            Self::Query => Self::Results,
            Self::Results => Self::Tables,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Tables => "Tables",
            Self::Query => "Query",
            Self::Results => "Results",
        }
    }
}

#[derive(Debug, Default)]
pub struct PanelSet {
    pub tables: TextSurface,
    pub query: TextSurface,
    pub results: TextSurface,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectTableError {
    #[error("no table is selected in the table list")]
    Selection,
    #[error("table query failed: {0}")]
    Query(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Rendered { row_count: usize },
    FailedInline,
}

#[derive(Debug)]
pub struct PanelCoordinator<D> {
    driver: D,
    panels: PanelSet,
    focus: PanelFocus,
    last_result: Option<ResultSet>,
}

impl<D: Driver> PanelCoordinator<D> {
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            panels: PanelSet::default(),
            focus: PanelFocus::default(),
            last_result: None,
        }
    }

    #[must_use]
    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelSet {
        &mut self.panels
    }

    #[must_use]
    pub fn focus(&self) -> PanelFocus {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&ResultSet> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn dialect_name(&self) -> &str {
        self.driver.dialect()
    }

    pub async fn load_catalog(&mut self) -> Result<usize, CatalogError> {
        let names = catalog::load_tables(&self.driver, &mut self.panels.tables).await?;
        Ok(names.len())
    }

    pub async fn submit_query(&mut self) -> SubmitStatus {
        self.panels.query.rewind();
        self.panels.results.clear();

        let sql = self.panels.query.buffer();
        match executor::execute(&self.driver, &sql).await {
            ExecutionOutcome::Success(result) => {
                render_result_table(&mut self.panels.results, &result);
                let row_count = result.row_count();
                self.last_result = Some(result);
                SubmitStatus::Rendered { row_count }
            }
            ExecutionOutcome::Failure(message) => {
                self.panels.results.append_error_line(message);
                self.last_result = None;
                SubmitStatus::FailedInline
            }
        }
    }

    pub async fn select_table(&mut self) -> Result<usize, SelectTableError> {
        let table = self
            .panels
            .tables
            .line_at_cursor()
            .ok_or(SelectTableError::Selection)?
            .to_string();

        self.panels.results.clear();
        match executor::select_table_contents(&self.driver, &table).await {
            ExecutionOutcome::Success(result) => {
                render_result_table(&mut self.panels.results, &result);
                let row_count = result.row_count();
                self.last_result = Some(result);
                Ok(row_count)
            }
            ExecutionOutcome::Failure(message) => Err(SelectTableError::Query(message)),
        }
    }
}
