mod cli;
mod logging;

use clap::Parser;
use sqlpane_adapters::mysql::MysqlDriver;
use sqlpane_adapters::postgres::PostgresDriver;
use sqlpane_core::dialect::Dialect;
use sqlpane_core::profiles::FileProfilesStore;

use crate::cli::{resolve_profile, Cli};

fn run_session(
    run_tui: impl FnOnce() -> Result<(), sqlpane_tui::TuiError>,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tui()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_file_logging();

    let store = FileProfilesStore::load_default()?;
    if cli.list_profiles {
        for profile in store.profiles() {
            println!(
                "{}  {}://{}@{}:{}",
                profile.name,
                profile.dialect.name(),
                profile.user,
                profile.host,
                profile.port
            );
        }
        return Ok(());
    }

    let profile = resolve_profile(&cli, &store)?;
    tracing::info!(
        profile = %profile.name,
        dialect = profile.dialect.name(),
        "starting session"
    );

    match profile.dialect {
        Dialect::Mysql => run_session(|| sqlpane_tui::run(MysqlDriver::from_profile(&profile))),
        Dialect::Postgres => {
            let driver = PostgresDriver::from_profile(&profile)?;
            run_session(|| sqlpane_tui::run(driver))
        }
    }
}
