use crate::data_store::models::{ListingItem, Venue};
use crate::data_store::{ShowFilterBuilder, VenueId};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::endpoints::{SearchFormData, ShowCard};
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::venue_areas::{group_by_area, VenueArea};
use crate::web::FyyurAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues")]
async fn list_venues(
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let venues = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue_summaries(now)?)
    })
    .await??;

    let tmpl = VenuesTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venues",
        },
        areas: group_by_area(venues),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/search")]
async fn search_venues(
    data: Form<SearchFormData>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let search_term = data.into_inner().search_term;
    let term = search_term.clone();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.search_venues(&term, now)?)
    })
    .await??;

    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venue Search",
        },
        search_term: &search_term,
        results: &results,
        details_route: "venue_details",
    };
    Ok(Html::new(tmpl.render()?))
}

#[get("/venue/{venue_id}")]
async fn venue_details(
    path: web::Path<VenueId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let now = chrono::Utc::now();
    let (venue, past_shows, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        let past_shows = store.get_shows_filtered(
            ShowFilterBuilder::new()
                .at_venue(venue_id)
                .before(now)
                .build(),
        )?;
        let upcoming_shows = store.get_shows_filtered(
            ShowFilterBuilder::new()
                .at_venue(venue_id)
                .after(now)
                .build(),
        )?;
        Ok((venue, past_shows, upcoming_shows))
    })
    .await??;

    let tmpl = VenueDetailsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &venue.name,
        },
        venue: &venue,
        past_shows: past_shows.iter().map(ShowCard::with_artist).collect(),
        upcoming_shows: upcoming_shows.iter().map(ShowCard::with_artist).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "venues.html")]
struct VenuesTemplate<'a> {
    base: BaseTemplateContext<'a>,
    areas: Vec<VenueArea>,
}

/// Search results page, shared by the venue and artist search
#[derive(Template)]
#[template(path = "search_results.html")]
pub(super) struct SearchResultsTemplate<'a> {
    pub(super) base: BaseTemplateContext<'a>,
    pub(super) search_term: &'a str,
    pub(super) results: &'a Vec<ListingItem>,
    /// Name of the route for linking the results
    pub(super) details_route: &'a str,
}

#[derive(Template)]
#[template(path = "venue_details.html")]
struct VenueDetailsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a Venue,
    past_shows: Vec<ShowCard>,
    upcoming_shows: Vec<ShowCard>,
}
