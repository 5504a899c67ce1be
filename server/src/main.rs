use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use fsnd_server::cli::Application;
use fsnd_server::cli_error::CliError;
use log::{error, warn};
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    if let Err(e) = run_command(args.command) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve { application } => {
            fsnd_server::cli::database_migration::check_migration_state(application)?;
            fsnd_server::web::serve(application)
        }
        Command::MigrateDatabase { application } => {
            fsnd_server::cli::database_migration::run_migrations(application)
        }
        Command::LoadData { application, path } => {
            fsnd_server::cli::file_io::load_data_from_file(application, &path)
        }
    }
}

/// Fyyur venue directory and Trivia quiz API server
#[derive(Debug, Parser)]
#[clap(name = "fsnd", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve one of the web applications
    Serve {
        #[clap(value_enum)]
        application: Application,
    },
    /// Create or update the database schema of one of the applications
    MigrateDatabase {
        #[clap(value_enum)]
        application: Application,
    },
    /// Load data from JSON file into the database of one of the applications
    LoadData {
        #[clap(value_enum)]
        application: Application,
        /// The path of the JSON file to read from
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
