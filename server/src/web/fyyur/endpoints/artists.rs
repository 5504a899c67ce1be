use crate::data_store::models::{Artist, ListingItem};
use crate::data_store::{ArtistId, ShowFilterBuilder};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::endpoints::venues::SearchResultsTemplate;
use crate::web::fyyur::endpoints::{SearchFormData, ShowCard};
use crate::web::fyyur::error::AppError;
use crate::web::FyyurAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists")]
async fn list_artists(
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let artists = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist_summaries(now)?)
    })
    .await??;

    let tmpl = ArtistsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artists",
        },
        artists: &artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/search")]
async fn search_artists(
    data: Form<SearchFormData>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let search_term = data.into_inner().search_term;
    let term = search_term.clone();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.search_artists(&term, now)?)
    })
    .await??;

    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artist Search",
        },
        search_term: &search_term,
        results: &results,
        details_route: "artist_details",
    };
    Ok(Html::new(tmpl.render()?))
}

#[get("/artist/{artist_id}")]
async fn artist_details(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let now = chrono::Utc::now();
    let (artist, past_shows, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        let past_shows = store.get_shows_filtered(
            ShowFilterBuilder::new()
                .by_artist(artist_id)
                .before(now)
                .build(),
        )?;
        let upcoming_shows = store.get_shows_filtered(
            ShowFilterBuilder::new()
                .by_artist(artist_id)
                .after(now)
                .build(),
        )?;
        Ok((artist, past_shows, upcoming_shows))
    })
    .await??;

    let tmpl = ArtistDetailsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &artist.name,
        },
        artist: &artist,
        past_shows: past_shows.iter().map(ShowCard::with_venue).collect(),
        upcoming_shows: upcoming_shows.iter().map(ShowCard::with_venue).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "artists.html")]
struct ArtistsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artists: &'a Vec<ListingItem>,
}

#[derive(Template)]
#[template(path = "artist_details.html")]
struct ArtistDetailsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a Artist,
    past_shows: Vec<ShowCard>,
    upcoming_shows: Vec<ShowCard>,
}
