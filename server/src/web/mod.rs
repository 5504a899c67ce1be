use crate::cli::Application;
use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, FyyurStore, TriviaStore};
use crate::setup::ServerSettings;
use actix_web::middleware::from_fn;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

mod fyyur;
mod http_error_logging;
mod trivia;

/// Run the web server for the given application until it is stopped.
///
/// The database connection pool is created from the "DATABASE_URL" environment variable, the
/// listening socket from "LISTEN_ADDRESS" and "LISTEN_PORT".
pub fn serve(application: Application) -> Result<(), CliError> {
    let settings = ServerSettings::from_env()?;
    let store = Arc::new(get_store_from_env()?);
    info!(
        "Starting {} application on {}:{} ...",
        application, settings.listen_address, settings.listen_port
    );

    let system = actix_web::rt::System::new();
    let server = match application {
        Application::Fyyur => {
            let state = FyyurAppState {
                store: store.clone(),
            };
            HttpServer::new(move || {
                App::new()
                    .configure(fyyur::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(http_error_logging::error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind((settings.listen_address.as_str(), settings.listen_port))
            .map_err(CliError::BindError)?
            .run()
        }
        Application::Trivia => {
            let state = TriviaAppState {
                store: store.clone(),
            };
            HttpServer::new(move || {
                App::new()
                    .configure(trivia::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(http_error_logging::error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind((settings.listen_address.as_str(), settings.listen_port))
            .map_err(CliError::BindError)?
            .run()
        }
    };
    system.block_on(server).map_err(CliError::ServerError)
}

#[derive(Clone)]
pub struct FyyurAppState {
    store: Arc<dyn FyyurStore>,
}

#[derive(Clone)]
pub struct TriviaAppState {
    store: Arc<dyn TriviaStore>,
}
