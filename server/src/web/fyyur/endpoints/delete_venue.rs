use crate::data_store::models::Venue;
use crate::data_store::{ShowFilterBuilder, VenueId};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use crate::web::FyyurAppState;
use actix_web::web::{Html, Redirect};
use actix_web::{get, route, web, HttpRequest, Responder};
use askama::Template;
use log::error;

#[get("/venue/{venue_id}/delete")]
async fn delete_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let (venue, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venue(venue_id)?,
            store.get_shows_filtered(ShowFilterBuilder::new().at_venue(venue_id).build())?,
        ))
    })
    .await??;

    let tmpl = DeleteVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Delete venue",
        },
        venue: &venue,
        num_shows: shows.len(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// Delete the venue together with all of its shows
#[route("/venue/{venue_id}/delete", method = "POST", method = "DELETE")]
async fn delete_venue(
    path: web::Path<VenueId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let result = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        store.delete_venue(venue_id)?;
        Ok(venue.name)
    })
    .await?;

    match result {
        Ok(name) => {
            req.add_flash_message(FlashMessage::success(format!(
                "Venue: {} has been deleted.",
                name
            )));
            Ok(Redirect::to(
                req.url_for("list_venues", std::iter::empty::<&str>())?
                    .to_string(),
            )
            .see_other())
        }
        Err(AppError::EntityNotFound) => Err(AppError::EntityNotFound),
        Err(e) => {
            error!("Could not delete venue {}: {}", venue_id, e);
            req.add_flash_message(FlashMessage::error(
                "An error occurred. The venue could not be deleted.".to_owned(),
            ));
            Ok(Redirect::to(
                req.url_for("venue_details", [venue_id.to_string()])?
                    .to_string(),
            )
            .see_other())
        }
    }
}

#[derive(Template)]
#[template(path = "delete_venue_form.html")]
struct DeleteVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a Venue,
    num_shows: usize,
}
