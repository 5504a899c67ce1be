//! The Trivia quiz JSON API
//!
//! All responses (including error responses) are JSON objects with a `success` field and carry
//! permissive CORS headers, so the API can be used by a quiz frontend served from another origin.

use std::fmt::Display;

mod endpoints_category;
mod endpoints_question;
mod endpoints_quiz;
#[cfg(test)]
mod tests;

use crate::data_store::StoreError;
use actix_web::dev::ResourceDef;
use actix_web::error::JsonPayloadError;
use actix_web::http::Method;
use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    middleware, web, HttpRequest, HttpResponse,
};

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Paths of all API resources. Requests to these paths with an unsupported method are answered with
/// "405 Method Not Allowed" instead of "404 Not Found".
const RESOURCE_PATHS: [&str; 6] = [
    "/categories",
    "/categories/{category_id}/questions",
    "/questions",
    "/questions/search",
    "/questions/{question_id}",
    "/quizzes",
];

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(get_api_service());
}

fn get_api_service() -> impl actix_web::dev::HttpServiceFactory {
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| APIError::InvalidJson(err).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| APIError::BadRequest(err.to_string()).into());
    let path_config =
        web::PathConfig::default().error_handler(|_err, _req| APIError::NotExisting.into());
    web::scope("")
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .wrap(
            middleware::DefaultHeaders::new()
                .add(("Access-Control-Allow-Origin", "*"))
                .add((
                    "Access-Control-Allow-Headers",
                    "Content-Type,Authorization,true",
                ))
                .add((
                    "Access-Control-Allow-Methods",
                    "GET,PUT,POST,DELETE,OPTIONS",
                )),
        )
        .service(endpoints_category::list_categories)
        .service(endpoints_category::list_questions_of_category)
        .service(endpoints_question::list_questions)
        .service(endpoints_question::search_questions)
        .service(endpoints_question::create_question)
        .service(endpoints_question::delete_question)
        .service(endpoints_quiz::next_quiz_question)
        .default_service(web::to(default_handler))
}

/// Fallback handler for all requests not matched by one of the endpoints.
///
/// Answers CORS preflight requests and creates the appropriate error for all other requests.
async fn default_handler(req: HttpRequest) -> Result<HttpResponse, APIError> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::Ok().finish());
    }
    if ResourceDef::new(RESOURCE_PATHS).is_match(req.path()) {
        Err(APIError::MethodNotAllowed)
    } else {
        Err(APIError::NotExisting)
    }
}

/// Calculate the offset and limit of the questions to be shown on the given page (1-based)
///
/// Returns None for page numbers < 1 and for pages whose offset does not fit into an i64.
pub fn page_slice(page: i64) -> Option<(i64, i64)> {
    if page < 1 {
        return None;
    }
    let offset = page.checked_sub(1)?.checked_mul(QUESTIONS_PER_PAGE)?;
    Some((offset, QUESTIONS_PER_PAGE))
}

#[derive(Debug)]
pub enum APIError {
    NotExisting,
    MethodNotAllowed,
    BadRequest(String),
    InvalidJson(actix_web::error::JsonPayloadError),
    InvalidData(String),
    TransactionConflict,
    InternalError(String),
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotExisting => f.write_str("resource not found"),
            Self::MethodNotAllowed => f.write_str("method not allowed"),
            Self::BadRequest(e) => write!(f, "bad request: {}", e),
            Self::InvalidJson(e) => write!(f, "unprocessable: invalid JSON request data: {}", e),
            Self::InvalidData(e) => write!(f, "unprocessable: {}", e),
            Self::TransactionConflict => {
                f.write_str("Concurrent database transaction conflict. Please retry request.")
            }
            Self::InternalError(s) => write!(f, "internal server error: {}", s),
        }
    }
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(fsnd_api_types::ErrorResponse {
                success: false,
                error: self.status_code().as_u16(),
                message: self.to_string(),
            })
    }
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotExisting => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidJson(e) => match e {
                JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                JsonPayloadError::Deserialize(json_error) if json_error.is_data() => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TransactionConflict => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => {
                Self::InternalError(format!("Could not connect to database: {}", error))
            }
            StoreError::QueryError(diesel_error) => Self::InternalError(format!(
                "Error while executing database query: {}",
                diesel_error
            )),
            StoreError::TransactionConflict => Self::TransactionConflict,
            StoreError::NotExisting => Self::NotExisting,
            StoreError::InvalidInputData(e) => Self::InvalidData(e),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
        }
    }
}

impl From<actix_web::error::BlockingError> for APIError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        APIError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}
