use crate::web::fyyur::error::AppError;
use crate::web::trivia::APIError;
use log::{error, warn};

/// Middleware for logging the errors returned by endpoint handlers of both applications
///
/// Client errors are logged as warnings, database and internal errors as errors.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(app_error) = error.as_error::<AppError>() {
            match app_error {
                AppError::PageNotFound | AppError::EntityNotFound => {
                    warn!(
                        "HTTP {} page not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::TransactionConflict => {
                    warn!(
                        "HTTP {} transaction conflict at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                AppError::DatabaseConnectionError(e) => {
                    error!(
                        "HTTP {} database connection error: {}",
                        response.response().status(),
                        e
                    );
                }
                AppError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else if let Some(api_error) = error.as_error::<APIError>() {
            match api_error {
                APIError::NotExisting | APIError::MethodNotAllowed => {
                    warn!(
                        "HTTP {} at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        api_error
                    );
                }
                APIError::BadRequest(_) | APIError::InvalidJson(_) | APIError::InvalidData(_) => {
                    warn!(
                        "HTTP {} invalid data at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        api_error
                    );
                }
                APIError::TransactionConflict => {
                    warn!(
                        "HTTP {} transaction conflict at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                APIError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
