use crate::data_store::models::Artist;
use crate::data_store::{ArtistId, ShowFilterBuilder};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use crate::web::FyyurAppState;
use actix_web::web::{Html, Redirect};
use actix_web::{get, route, web, HttpRequest, Responder};
use askama::Template;
use log::error;

#[get("/artist/{artist_id}/delete")]
async fn delete_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let (artist, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artist(artist_id)?,
            store.get_shows_filtered(ShowFilterBuilder::new().by_artist(artist_id).build())?,
        ))
    })
    .await??;

    let tmpl = DeleteArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Delete artist",
        },
        artist: &artist,
        num_shows: shows.len(),
    };
    Ok(Html::new(tmpl.render()?))
}

/// Delete the artist together with all of its shows
#[route("/artist/{artist_id}/delete", method = "POST", method = "DELETE")]
async fn delete_artist(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let result = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        store.delete_artist(artist_id)?;
        Ok(artist.name)
    })
    .await?;

    match result {
        Ok(name) => {
            req.add_flash_message(FlashMessage::success(format!(
                "Artist: {} has been deleted.",
                name
            )));
            Ok(Redirect::to(
                req.url_for("list_artists", std::iter::empty::<&str>())?
                    .to_string(),
            )
            .see_other())
        }
        Err(AppError::EntityNotFound) => Err(AppError::EntityNotFound),
        Err(e) => {
            error!("Could not delete artist {}: {}", artist_id, e);
            req.add_flash_message(FlashMessage::error(
                "An error occurred. The artist could not be deleted.".to_owned(),
            ));
            Ok(Redirect::to(
                req.url_for("artist_details", [artist_id.to_string()])?
                    .to_string(),
            )
            .see_other())
        }
    }
}

#[derive(Template)]
#[template(path = "delete_artist_form.html")]
struct DeleteArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a Artist,
    num_shows: usize,
}
