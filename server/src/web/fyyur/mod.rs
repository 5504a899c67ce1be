//! The Fyyur venue & artist booking directory: server-rendered HTML pages and forms

use crate::web::fyyur::error::AppError;
use crate::web::fyyur::error_page::error_page_middleware;
use crate::web::fyyur::flash::flash_middleware;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::middleware::from_fn;
use actix_web::{get, web, HttpResponse, Responder};
use rust_embed::Embed;

mod base_template;
mod endpoints;
pub mod error;
mod error_page;
mod flash;
mod form_values;
mod sub_templates;
mod util;
mod validation;
mod venue_areas;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        get_fyyur_service()
            .wrap(from_fn(flash_middleware))
            .wrap(from_fn(error_page_middleware)),
    );
}

fn get_fyyur_service() -> actix_web::Scope {
    web::scope("")
        .service(static_resources)
        .service(endpoints::index::index)
        .service(endpoints::venues::list_venues)
        .service(endpoints::venues::search_venues)
        .service(endpoints::venues::venue_details)
        .service(endpoints::edit_venue::new_venue_form)
        .service(endpoints::edit_venue::new_venue)
        .service(endpoints::edit_venue::edit_venue_form)
        .service(endpoints::edit_venue::edit_venue)
        .service(endpoints::delete_venue::delete_venue_form)
        .service(endpoints::delete_venue::delete_venue)
        .service(endpoints::artists::list_artists)
        .service(endpoints::artists::search_artists)
        .service(endpoints::artists::artist_details)
        .service(endpoints::edit_artist::new_artist_form)
        .service(endpoints::edit_artist::new_artist)
        .service(endpoints::edit_artist::edit_artist_form)
        .service(endpoints::edit_artist::edit_artist)
        .service(endpoints::delete_artist::delete_artist_form)
        .service(endpoints::delete_artist::delete_artist)
        .service(endpoints::shows::list_shows)
        .service(endpoints::shows::new_show_form)
        .service(endpoints::shows::new_show)
        .service(endpoints::shows::search_shows_by_artist)
        .service(endpoints::shows::search_shows_by_venue)
        .default_service(web::to(not_found_handler))
}

#[derive(Embed)]
#[folder = "static/"]
struct Resources;

impl Resources {
    fn handle_embedded_file(path: &str) -> HttpResponse {
        match Self::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(mime_guess::from_path(path).first_or_octet_stream().as_ref())
                .append_header(CacheControl(vec![CacheDirective::MaxAge(86400 * 365)]))
                .body(content.data.into_owned()),
            None => {
                HttpResponse::NotFound().body(format!("Static resource file '{}' not found", path))
            }
        }
    }
}

#[get("/static/{_:.*}")]
async fn static_resources(path: web::Path<String>) -> impl Responder {
    Resources::handle_embedded_file(path.as_str())
}

async fn not_found_handler() -> Result<&'static str, AppError> {
    Err(AppError::PageNotFound)
}
