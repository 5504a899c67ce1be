//! Loading initial data from JSON files into the application databases

use crate::cli::Application;
use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, models, FyyurStore, TriviaStore};
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Deserialize)]
struct SavedVenue {
    id: i32,
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    image_link: String,
    #[serde(default)]
    facebook_link: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    seeking_talent: bool,
    #[serde(default)]
    seeking_description: String,
}

impl From<SavedVenue> for (i32, models::NewVenue) {
    fn from(value: SavedVenue) -> Self {
        (
            value.id,
            models::NewVenue {
                name: value.name,
                city: value.city,
                state: value.state,
                address: value.address,
                phone: value.phone,
                genres: value.genres,
                image_link: value.image_link,
                facebook_link: value.facebook_link,
                website: value.website,
                seeking_talent: value.seeking_talent,
                seeking_description: value.seeking_description,
            },
        )
    }
}

#[derive(Deserialize)]
struct SavedArtist {
    id: i32,
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    image_link: String,
    #[serde(default)]
    facebook_link: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    seeking_venue: bool,
    #[serde(default)]
    seeking_description: String,
}

impl From<SavedArtist> for (i32, models::NewArtist) {
    fn from(value: SavedArtist) -> Self {
        (
            value.id,
            models::NewArtist {
                name: value.name,
                city: value.city,
                state: value.state,
                phone: value.phone,
                genres: value.genres,
                image_link: value.image_link,
                facebook_link: value.facebook_link,
                website: value.website,
                seeking_venue: value.seeking_venue,
                seeking_description: value.seeking_description,
            },
        )
    }
}

#[derive(Deserialize)]
struct SavedShow {
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SavedDirectory {
    #[serde(default)]
    venues: Vec<SavedVenue>,
    #[serde(default)]
    artists: Vec<SavedArtist>,
    #[serde(default)]
    shows: Vec<SavedShow>,
}

impl From<SavedDirectory> for models::DirectoryImport {
    fn from(value: SavedDirectory) -> Self {
        Self {
            venues: value.venues.into_iter().map(|v| v.into()).collect(),
            artists: value.artists.into_iter().map(|a| a.into()).collect(),
            shows: value
                .shows
                .into_iter()
                .map(|s| models::NewShow {
                    venue_id: s.venue_id,
                    artist_id: s.artist_id,
                    start_time: s.start_time,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct SavedQuestions {
    questions: Vec<fsnd_api_types::NewQuestion>,
}

fn open_file(path: &PathBuf) -> Result<BufReader<File>, CliError> {
    let f = File::open(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for reading: {}", path, e))
    })?;
    Ok(BufReader::new(f))
}

/// Import the contents of a JSON file into the database of the given application, using the
/// database connection from the "DATABASE_URL" environment variable.
pub fn load_data_from_file(application: Application, path: &PathBuf) -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    let reader = open_file(path)?;

    match application {
        Application::Fyyur => {
            let data: SavedDirectory = serde_json::from_reader(reader)?;
            let mut data_store = FyyurStore::get_facade(&data_store_pool)?;
            let (venues, artists, shows) = data_store.import_directory(data.into())?;
            info!(
                "Imported {} venues, {} artists and {} shows.",
                venues, artists, shows
            );
        }
        Application::Trivia => {
            let data: SavedQuestions = serde_json::from_reader(reader)?;
            let mut data_store = TriviaStore::get_facade(&data_store_pool)?;
            let count = data_store
                .import_questions(data.questions.into_iter().map(|q| q.into()).collect())?;
            info!("Imported {} questions.", count);
        }
    }

    Ok(())
}
