use crate::data_store::models::{NewArtist, Artist};
use crate::data_store::{StoreError, ArtistId};
use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use crate::web::fyyur::form_values::{BoolFormValue, FormValue, _FormValidSimpleValidate};
use crate::web::fyyur::util::FormSubmitResult;
use crate::web::fyyur::{util, validation};
use crate::web::FyyurAppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[get("/artists/create")]
pub async fn new_artist_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ArtistFormData::default();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new artist",
        },
        form_data: &form_data,
        artist_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/create")]
pub async fn new_artist(
    state: web::Data<FyyurAppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let artist = form_data.validate();

    let (result, artist_id): (FormSubmitResult, Option<ArtistId>) = if let Some(artist) = artist {
        let store_result = web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_artist(artist)
        })
        .await?;
        match store_result {
            Ok(artist_id) => (FormSubmitResult::Success, Some(artist_id)),
            Err(e) => (FormSubmitResult::from(Err::<(), _>(e)), None),
        }
    } else {
        (FormSubmitResult::ValidationError, None)
    };

    let name = form_data.name.string_value().trim().to_owned();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new artist",
        },
        form_data: &form_data,
        artist_id: None,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        format!("Artist {} was successfully listed!", name),
        format!("An error occurred. Artist {} could not be listed.", name),
        req.url_for("artist_details", [artist_id.unwrap_or_default().to_string()])?,
        &req,
    )
}

#[get("/artist/{artist_id}/edit")]
pub async fn edit_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let artist = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let form_data: ArtistFormData = artist.into();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit artist",
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artist/{artist_id}/edit")]
pub async fn edit_artist(
    path: web::Path<ArtistId>,
    state: web::Data<FyyurAppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let mut form_data = data.into_inner();
    let artist = form_data.validate();

    let result: FormSubmitResult = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_artist(artist_id, artist)
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let name = form_data.name.string_value().trim().to_owned();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit artist",
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        format!("Artist: {} updates have been saved.", name),
        format!("An error occurred. Artist {} could not be updated.", name),
        req.url_for("artist_details", [artist_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct ArtistFormData {
    name: FormValue<validation::NonEmptyString>,
    city: FormValue<validation::ShortText>,
    state: FormValue<validation::UsState>,
    #[serde(default)]
    phone: FormValue<validation::Phone>,
    genres: FormValue<validation::Genres>,
    #[serde(default)]
    image_link: FormValue<validation::OptionalImageUrl>,
    #[serde(default)]
    facebook_link: FormValue<validation::OptionalUrl>,
    #[serde(default)]
    website: FormValue<validation::OptionalUrl>,
    seeking_venue: BoolFormValue,
    #[serde(default)]
    seeking_description: FormValue<String>,
}

impl ArtistFormData {
    fn validate(&mut self) -> Option<NewArtist> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate();
        let image_link = self.image_link.validate();
        let facebook_link = self.facebook_link.validate();
        let website = self.website.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewArtist {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            phone: phone?.into_inner(),
            genres: genres?.into_inner(),
            image_link: image_link?.into_inner(),
            facebook_link: facebook_link?.into_inner(),
            website: website?.into_inner(),
            seeking_venue: self.seeking_venue.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Artist> for ArtistFormData {
    fn from(value: Artist) -> Self {
        Self {
            name: validation::NonEmptyString(value.name).into(),
            city: validation::ShortText(value.city).into(),
            state: validation::UsState(value.state).into(),
            phone: validation::Phone(value.phone).into(),
            genres: validation::Genres(value.genres).into(),
            image_link: validation::OptionalImageUrl(value.image_link).into(),
            facebook_link: validation::OptionalUrl(value.facebook_link).into(),
            website: validation::OptionalUrl(value.website).into(),
            seeking_venue: value.seeking_venue.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_artist_form.html")]
struct EditArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ArtistFormData,
    artist_id: Option<ArtistId>,
}

impl EditArtistFormTemplate<'_> {
    fn post_url(&self) -> Result<url::Url, AppError> {
        match self.artist_id {
            None => Ok(self
                .base
                .request
                .url_for("new_artist", std::iter::empty::<&str>())?),
            Some(artist_id) => Ok(self
                .base
                .request
                .url_for("edit_artist", [artist_id.to_string()])?),
        }
    }
}
