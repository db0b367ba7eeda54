use serde::{Deserialize, Serialize};

const POSTGRES_CATALOG_STATEMENT: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_schema='public' ORDER BY table_name;";
const MYSQL_CATALOG_STATEMENT: &str = "SHOW TABLES;";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[serde(alias = "postgresql")]
    Postgres,
    Mysql,
}

impl Dialect {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "mysql" => Some(Self::Mysql),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
        }
    }

    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::Mysql => 3306,
        }
    }

    #[must_use]
    pub fn catalog_statement(self) -> &'static str {
        match self {
            Self::Postgres => POSTGRES_CATALOG_STATEMENT,
            Self::Mysql => MYSQL_CATALOG_STATEMENT,
        }
    }

    #[must_use]
    pub fn quote_identifier(self, identifier: &str) -> String {
        match self {
            Self::Postgres => format!("\"{}\"", identifier.replace('"', "\"\"")),
            Self::Mysql => format!("`{}`", identifier.replace('`', "``")),
        }
    }

    #[must_use]
    pub fn select_all_statement(self, table: &str) -> String {
        format!("SELECT * FROM {}", self.quote_identifier(table))
    }
}

#[cfg(test)]
mod tests {
    use super::Dialect;

    #[test]
    fn recognizes_supported_dialect_names() {
        assert_eq!(Dialect::from_name("postgres"), Some(Dialect::Postgres));
        assert_eq!(Dialect::from_name("postgresql"), Some(Dialect::Postgres));
        assert_eq!(Dialect::from_name("MySQL"), Some(Dialect::Mysql));
        assert_eq!(Dialect::from_name("sqlite"), None);
        assert_eq!(Dialect::from_name(""), None);
    }

    #[test]
    fn each_dialect_maps_to_one_catalog_statement() {
        assert_eq!(
            Dialect::Postgres.catalog_statement(),
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema='public' ORDER BY table_name;"
        );
        assert_eq!(Dialect::Mysql.catalog_statement(), "SHOW TABLES;");
    }

    #[test]
    fn quotes_identifiers_per_dialect() {
        assert_eq!(Dialect::Mysql.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::Mysql.quote_identifier("odd`name"), "`odd``name`");
        assert_eq!(Dialect::Postgres.quote_identifier("users"), "\"users\"");
        assert_eq!(
            Dialect::Postgres.quote_identifier("odd\"name"),
            "\"odd\"\"name\""
        );
    }

    #[test]
    fn builds_select_all_statement_from_table_name() {
        assert_eq!(
            Dialect::Mysql.select_all_statement("orders"),
            "SELECT * FROM `orders`"
        );
        assert_eq!(
            Dialect::Postgres.select_all_statement("orders"),
            "SELECT * FROM \"orders\""
        );
    }
}
