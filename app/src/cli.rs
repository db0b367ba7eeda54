use clap::{Parser, ValueEnum};
use sqlpane_core::dialect::Dialect;
use sqlpane_core::profiles::{ConnectionProfile, FileProfilesStore};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Postgres,
    Mysql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Self::Postgres,
            DialectArg::Mysql => Self::Mysql,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqlpane", version, about = "Terminal browser for relational databases")]
pub struct Cli {
    /// Connection profile name from profiles.toml
    pub profile: Option<String>,

    /// Database dialect for an ad-hoc connection
    #[arg(long, value_enum)]
    pub dialect: Option<DialectArg>,

    /// Database server host
    #[arg(long)]
    pub host: Option<String>,

    /// Database server port (defaults to the dialect's standard port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database to open after connecting
    #[arg(long)]
    pub database: Option<String>,

    /// List configured profiles and exit
    #[arg(long)]
    pub list_profiles: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown profile `{0}`")]
    UnknownProfile(String),
    #[error("an ad-hoc connection needs --dialect, --host and --user (or a profile name)")]
    MissingConnectionDetails,
}

pub fn resolve_profile(
    cli: &Cli,
    store: &FileProfilesStore,
) -> Result<ConnectionProfile, CliError> {
    if let Some(name) = &cli.profile {
        let mut profile = store
            .profile(name)
            .cloned()
            .ok_or_else(|| CliError::UnknownProfile(name.clone()))?;

        if let Some(host) = &cli.host {
            profile.host = host.clone();
        }
        if let Some(port) = cli.port {
            profile.port = port;
        }
        if let Some(user) = &cli.user {
            profile.user = user.clone();
        }
        if cli.database.is_some() {
            profile.database = cli.database.clone();
        }
        return Ok(profile);
    }

    let (Some(dialect), Some(host), Some(user)) = (cli.dialect, &cli.host, &cli.user) else {
        return Err(CliError::MissingConnectionDetails);
    };

    let mut profile = ConnectionProfile::new("ad-hoc", dialect.into(), host.clone(), user.clone());
    if let Some(port) = cli.port {
        profile.port = port;
    }
    profile.database = cli.database.clone();
    Ok(profile)
}
