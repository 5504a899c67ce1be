use crate::data_store::StoreError;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use actix_web::http::header::ContentType;
use actix_web::web::Redirect;
use actix_web::{Either, HttpRequest, HttpResponse};
use askama::Template;
use chrono::{DateTime, Utc};
use log::error;

/// Format a show's start time for the venue and artist detail pages
pub fn format_detail_time(time: &DateTime<Utc>) -> String {
    time.format("%m/%d/%Y, %H:%M").to_string()
}

/// Format a show's start time for the show listings
pub fn format_listing_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d, %H:%M:%S").to_string()
}

/// Helper type for representing the different possible outcomes of submitting a create or edit
/// form.
///
/// They are used to delegate creating appropriate response to [create_edit_form_response()].
pub enum FormSubmitResult {
    Success,
    ValidationError,
    PersistenceError(StoreError),
    UnexpectedError(AppError),
}

impl From<Result<(), StoreError>> for FormSubmitResult {
    fn from(value: Result<(), StoreError>) -> Self {
        match value {
            Ok(()) => FormSubmitResult::Success,
            Err(StoreError::NotExisting) => {
                FormSubmitResult::UnexpectedError(AppError::EntityNotFound)
            }
            Err(StoreError::ConnectionError(e)) => {
                FormSubmitResult::UnexpectedError(AppError::DatabaseConnectionError(e))
            }
            Err(e) => FormSubmitResult::PersistenceError(e),
        }
    }
}

/// Generate the HTTP response after submitting a create or edit form.
///
/// On success, the `success_message` is flashed and the client is redirected to
/// `success_redirect`. On invalid form data, the form is rendered again with the inline validation
/// errors (HTTP 422). When storing the entity failed, the form is rendered again with the
/// `failure_message` (HTTP 500).
pub fn create_edit_form_response(
    result: FormSubmitResult,
    tmpl: &impl Template,
    success_message: String,
    failure_message: String,
    success_redirect: url::Url,
    request: &HttpRequest,
) -> Result<Either<Redirect, HttpResponse>, AppError> {
    match result {
        FormSubmitResult::Success => {
            request.add_flash_message(FlashMessage::success(success_message));
            Ok(Either::Left(
                Redirect::to(success_redirect.to_string()).see_other(),
            ))
        }
        FormSubmitResult::ValidationError => {
            request.add_flash_message(FlashMessage::error(
                "The submitted data is invalid. Please check the highlighted fields.".to_owned(),
            ));
            Ok(Either::Right(
                HttpResponse::UnprocessableEntity()
                    .content_type(ContentType::html())
                    .body(tmpl.render()?),
            ))
        }
        FormSubmitResult::PersistenceError(e) => {
            error!("Could not store submitted form data: {}", e);
            request.add_flash_message(FlashMessage::error(failure_message));
            Ok(Either::Right(
                HttpResponse::InternalServerError()
                    .content_type(ContentType::html())
                    .body(tmpl.render()?),
            ))
        }
        FormSubmitResult::UnexpectedError(e) => Err(e),
    }
}
