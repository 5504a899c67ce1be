use crate::data_store::models::{FullShow, NewShow};
use crate::data_store::{ArtistId, ShowFilter, ShowFilterBuilder, StoreError, VenueId};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::flash::{FlashMessage, FlashesInterface};
use crate::web::fyyur::form_values::{FormValue, _FormValidSimpleValidate};
use crate::web::fyyur::util::FormSubmitResult;
use crate::web::fyyur::{util, validation};
use crate::web::FyyurAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::collections::HashMap;

#[get("/shows")]
async fn list_shows(
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let shows = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_shows_filtered(ShowFilter::default())?)
    })
    .await??;

    let tmpl = ShowsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Shows",
        },
        shows: shows.iter().map(ShowListEntry::from).collect(),
    };
    Ok(Html::new(tmpl.render()?))
}

#[get("/shows/create")]
async fn new_show_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ShowFormData::default();
    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new show",
        },
        form_data: &form_data,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/shows/create")]
async fn new_show(
    state: web::Data<FyyurAppState>,
    data: Form<ShowFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let show = form_data.validate();

    let result: FormSubmitResult = if let Some(show) = show {
        let store_result = web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            let artist_exists = exists(store.get_artist(show.artist_id))?;
            let venue_exists = exists(store.get_venue(show.venue_id))?;
            if artist_exists && venue_exists {
                store.create_show(show)?;
            }
            Ok((artist_exists, venue_exists))
        })
        .await?;
        match store_result {
            Ok((true, true)) => FormSubmitResult::Success,
            Ok((artist_exists, venue_exists)) => {
                if !artist_exists {
                    form_data
                        .artist_id
                        .add_error("There is no artist with this id.".to_owned());
                }
                if !venue_exists {
                    form_data
                        .venue_id
                        .add_error("There is no venue with this id.".to_owned());
                }
                FormSubmitResult::ValidationError
            }
            // Foreign key violation, e.g. the venue has been deleted in the meantime
            Err(StoreError::InvalidInputData(_)) => FormSubmitResult::ValidationError,
            Err(e) => FormSubmitResult::from(Err::<(), _>(e)),
        }
    } else {
        FormSubmitResult::ValidationError
    };

    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new show",
        },
        form_data: &form_data,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        "Show was successfully listed!".to_owned(),
        "An error occurred. Show could not be listed.".to_owned(),
        req.url_for("list_shows", std::iter::empty::<&str>())?,
        &req,
    )
}

fn exists<T>(result: Result<T, StoreError>) -> Result<bool, StoreError> {
    match result {
        Ok(_) => Ok(true),
        Err(StoreError::NotExisting) => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Deserialize)]
struct ArtistSearchFormData {
    #[serde(default)]
    artist_search_term: String,
}

#[derive(Deserialize)]
struct VenueSearchFormData {
    #[serde(default)]
    venue_search_term: String,
}

#[post("/shows/search/artist_id")]
async fn search_shows_by_artist(
    data: Form<ArtistSearchFormData>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().artist_search_term;
    let filter = search_term
        .trim()
        .parse::<ArtistId>()
        .ok()
        .map(|artist_id| ShowFilterBuilder::new().by_artist(artist_id).build());
    render_show_search_results(filter, &search_term, state, &req).await
}

#[post("/shows/search/venue_id")]
async fn search_shows_by_venue(
    data: Form<VenueSearchFormData>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().venue_search_term;
    let filter = search_term
        .trim()
        .parse::<VenueId>()
        .ok()
        .map(|venue_id| ShowFilterBuilder::new().at_venue(venue_id).build());
    render_show_search_results(filter, &search_term, state, &req).await
}

/// Look up the shows matching the filter and render them with the upcoming show count of their
/// venues. A missing filter (i.e. the search term is not a valid id) results in an empty list.
async fn render_show_search_results(
    filter: Option<ShowFilter>,
    search_term: &str,
    state: web::Data<FyyurAppState>,
    req: &HttpRequest,
) -> Result<Html, AppError> {
    let results = match filter {
        Some(filter) => {
            let now = chrono::Utc::now();
            let (shows, venues) = web::block(move || -> Result<_, AppError> {
                let mut store = state.store.get_facade()?;
                Ok((
                    store.get_shows_filtered(filter)?,
                    store.get_venue_summaries(now)?,
                ))
            })
            .await??;
            let upcoming_shows_by_venue: HashMap<VenueId, i64> = venues
                .into_iter()
                .map(|v| (v.id, v.num_upcoming_shows))
                .collect();
            shows
                .into_iter()
                .map(|show| ShowSearchResult {
                    num_upcoming_shows: upcoming_shows_by_venue
                        .get(&show.show.venue_id)
                        .copied()
                        .unwrap_or(0),
                    show,
                })
                .collect()
        }
        None => {
            req.add_flash_message(FlashMessage::error(format!(
                "'{}' is not a valid id.",
                search_term
            )));
            Vec::new()
        }
    };

    let tmpl = ShowSearchResultsTemplate {
        base: BaseTemplateContext {
            request: req,
            page_title: "Show Search",
        },
        search_term,
        results: &results,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Deserialize, Default)]
struct ShowFormData {
    artist_id: FormValue<validation::Int32>,
    venue_id: FormValue<validation::Int32>,
    start_time: FormValue<validation::ShowStartTime>,
}

impl ShowFormData {
    fn validate(&mut self) -> Option<NewShow> {
        let artist_id = self.artist_id.validate();
        let venue_id = self.venue_id.validate();
        let start_time = self.start_time.validate();

        Some(NewShow {
            artist_id: artist_id?.into_inner(),
            venue_id: venue_id?.into_inner(),
            start_time: start_time?.into_inner(),
        })
    }
}

/// A show as listed on the show listing page
struct ShowListEntry<'a> {
    show: &'a FullShow,
    start_time: String,
}

impl<'a> From<&'a FullShow> for ShowListEntry<'a> {
    fn from(show: &'a FullShow) -> Self {
        Self {
            show,
            start_time: util::format_listing_time(&show.show.start_time),
        }
    }
}

struct ShowSearchResult {
    show: FullShow,
    /// Number of upcoming shows of the show's venue
    num_upcoming_shows: i64,
}

#[derive(Template)]
#[template(path = "shows.html")]
struct ShowsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    shows: Vec<ShowListEntry<'a>>,
}

#[derive(Template)]
#[template(path = "new_show_form.html")]
struct NewShowFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ShowFormData,
}

#[derive(Template)]
#[template(path = "show_search_results.html")]
struct ShowSearchResultsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    search_term: &'a str,
    results: &'a Vec<ShowSearchResult>,
}
