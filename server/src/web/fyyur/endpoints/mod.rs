use crate::data_store::models::FullShow;
use crate::web::fyyur::util;
use serde::Deserialize;

pub mod artists;
pub mod delete_artist;
pub mod delete_venue;
pub mod edit_artist;
pub mod edit_venue;
pub mod index;
pub mod shows;
pub mod venues;

/// A show as listed on the detail page of a venue or artist, showing the other party of the show
pub struct ShowCard {
    pub id: i32,
    pub name: String,
    pub image_link: String,
    pub start_time: String,
}

impl ShowCard {
    fn with_artist(show: &FullShow) -> Self {
        Self {
            id: show.show.artist_id,
            name: show.artist_name.clone(),
            image_link: show.artist_image_link.clone(),
            start_time: util::format_detail_time(&show.show.start_time),
        }
    }

    fn with_venue(show: &FullShow) -> Self {
        Self {
            id: show.show.venue_id,
            name: show.venue_name.clone(),
            image_link: show.venue_image_link.clone(),
            start_time: util::format_detail_time(&show.show.start_time),
        }
    }
}

/// Form data of the venue and artist search forms
#[derive(Deserialize)]
pub struct SearchFormData {
    #[serde(default)]
    search_term: String,
}
