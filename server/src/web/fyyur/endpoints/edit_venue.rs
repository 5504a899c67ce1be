use crate::data_store::models::{NewVenue, Venue};
use crate::data_store::{StoreError, VenueId};
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

#[get("/venues/create")]
pub async fn new_venue_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = VenueFormData::default();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new venue",
        },
        form_data: &form_data,
        venue_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/create")]
pub async fn new_venue(
    state: web::Data<FyyurAppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let venue = form_data.validate();

    let (result, venue_id): (FormSubmitResult, Option<VenueId>) = if let Some(venue) = venue {
        let store_result = web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_venue(venue)
        })
        .await?;
        match store_result {
            Ok(venue_id) => (FormSubmitResult::Success, Some(venue_id)),
            Err(e) => (FormSubmitResult::from(Err::<(), _>(e)), None),
        }
    } else {
        (FormSubmitResult::ValidationError, None)
    };

    let name = form_data.name.string_value().trim().to_owned();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "List a new venue",
        },
        form_data: &form_data,
        venue_id: None,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        format!("Venue {} was successfully listed!", name),
        format!("An error occurred. Venue {} could not be listed.", name),
        req.url_for("venue_details", [venue_id.unwrap_or_default().to_string()])?,
        &req,
    )
}

#[get("/venue/{venue_id}/edit")]
pub async fn edit_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<FyyurAppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let venue = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let form_data: VenueFormData = venue.into();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit venue",
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venue/{venue_id}/edit")]
pub async fn edit_venue(
    path: web::Path<VenueId>,
    state: web::Data<FyyurAppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let mut form_data = data.into_inner();
    let venue = form_data.validate();

    let result: FormSubmitResult = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_venue(venue_id, venue)
        })
        .await?
        .into()
    } else {
        FormSubmitResult::ValidationError
    };

    let name = form_data.name.string_value().trim().to_owned();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Edit venue",
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        format!("Venue: {} updates have been saved.", name),
        format!("An error occurred. Venue {} could not be updated.", name),
        req.url_for("venue_details", [venue_id.to_string()])?,
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct VenueFormData {
    name: FormValue<validation::NonEmptyString>,
    city: FormValue<validation::ShortText>,
    state: FormValue<validation::UsState>,
    address: FormValue<validation::ShortText>,
    #[serde(default)]
    phone: FormValue<validation::Phone>,
    genres: FormValue<validation::Genres>,
    #[serde(default)]
    image_link: FormValue<validation::OptionalImageUrl>,
    #[serde(default)]
    facebook_link: FormValue<validation::OptionalUrl>,
    #[serde(default)]
    website: FormValue<validation::OptionalUrl>,
    seeking_talent: BoolFormValue,
    #[serde(default)]
    seeking_description: FormValue<String>,
}

impl VenueFormData {
    fn validate(&mut self) -> Option<NewVenue> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let address = self.address.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate();
        let image_link = self.image_link.validate();
        let facebook_link = self.facebook_link.validate();
        let website = self.website.validate();
        let seeking_description = self.seeking_description.validate();

        Some(NewVenue {
            name: name?.into_inner(),
            city: city?.into_inner(),
            state: state?.into_inner(),
            address: address?.into_inner(),
            phone: phone?.into_inner(),
            genres: genres?.into_inner(),
            image_link: image_link?.into_inner(),
            facebook_link: facebook_link?.into_inner(),
            website: website?.into_inner(),
            seeking_talent: self.seeking_talent.get_value(),
            seeking_description: seeking_description?,
        })
    }
}

impl From<Venue> for VenueFormData {
    fn from(value: Venue) -> Self {
        Self {
            name: validation::NonEmptyString(value.name).into(),
            city: validation::ShortText(value.city).into(),
            state: validation::UsState(value.state).into(),
            address: validation::ShortText(value.address).into(),
            phone: validation::Phone(value.phone).into(),
            genres: validation::Genres(value.genres).into(),
            image_link: validation::OptionalImageUrl(value.image_link).into(),
            facebook_link: validation::OptionalUrl(value.facebook_link).into(),
            website: validation::OptionalUrl(value.website).into(),
            seeking_talent: value.seeking_talent.into(),
            seeking_description: value.seeking_description.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_venue_form.html")]
struct EditVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a VenueFormData,
    venue_id: Option<VenueId>,
}

impl EditVenueFormTemplate<'_> {
    fn post_url(&self) -> Result<url::Url, AppError> {
        match self.venue_id {
            None => Ok(self
                .base
                .request
                .url_for("new_venue", std::iter::empty::<&str>())?),
            Some(venue_id) => Ok(self
                .base
                .request
                .url_for("edit_venue", [venue_id.to_string()])?),
        }
    }
}
