//! This module uses the embedded Diesel migration data to provide functions for checking the
//! database migration status and migrating the database schema to the current state.
//!
//! Each [Application] has its own set of migrations, since both applications are deployed against
//! separate databases. The functions provided are meant to be used directly from the command line
//! interface implementation.
use crate::cli::Application;
use crate::cli_error::CliError;
use crate::setup::get_database_url_from_env;
use diesel::migration::Migration;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

const FYYUR_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/fyyur");
const TRIVIA_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/trivia");

fn migrations_of(application: Application) -> EmbeddedMigrations {
    match application {
        Application::Fyyur => FYYUR_MIGRATIONS,
        Application::Trivia => TRIVIA_MIGRATIONS,
    }
}

/// Migrate the database schema of the given application to the latest known migration.
///
/// The database connection URL is taken from the environment variable, using
/// [get_database_url_from_env]. Information about the migration process is printed to stdout.
pub fn run_migrations(application: Application) -> Result<(), CliError> {
    let mut connection = diesel::pg::PgConnection::establish(&get_database_url_from_env()?)?;
    let mut connection =
        diesel_migrations::HarnessWithOutput::new(&mut connection, std::io::stdout());
    connection
        .run_pending_migrations(migrations_of(application))
        .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))?;

    Ok(())
}

/// Check if the database schema has been migrated to the latest known migration of the given
/// application. If not, return [CliError::DatabaseMigrationRequired], listing the missing
/// migrations.
///
/// The database connection URL is taken from the environment variable, using
/// [get_database_url_from_env].
pub fn check_migration_state(application: Application) -> Result<(), CliError> {
    let mut connection = diesel::pg::PgConnection::establish(&get_database_url_from_env()?)?;
    let pending_migrations = connection
        .pending_migrations(migrations_of(application))
        .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))?;
    if !pending_migrations.is_empty() {
        return Err(CliError::DatabaseMigrationRequired {
            missing_migrations: pending_migrations
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        });
    }
    Ok(())
}
