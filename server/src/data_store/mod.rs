//! The backend part of the backend: the database interface
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns an
//! object implementing the [FyyurStore] and [TriviaStore] traits. This object can be shared between
//! threads in a global application state and be used to create [FyyurStoreFacade] or
//! [TriviaStoreFacade] instances for interaction with the database. These provide a CRUD-like
//! interface, using the data models from the [models] module.
//!
//! The primary implementation ([postgres::PgDataStore]) wraps a PostgreSQL connection pool and its
//! corresponding facade objects ([postgres::PgDataStoreFacade]) hold one pooled connection each,
//! using the Diesel query DSL for implementing the database interaction.
//!
//! There is also a mock implementation for unittests.

use crate::cli_error::CliError;
use crate::setup;
use std::fmt::Debug;

pub mod models;
mod postgres;
mod schema;
#[cfg(test)]
pub mod store_mock;
mod util;

/// Get a data store instance, according to the "DATABASE_URL" environment variable.
///
/// The DATABASE_URL must be a PosgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_store_from_env() -> Result<postgres::PgDataStore, CliError> {
    postgres::PgDataStore::new(&setup::get_database_url_from_env()?)
        .map_err(|err| CliError::CouldNotConnectToDatabase(err.to_string()))
}

pub type VenueId = i32;
pub type ArtistId = i32;
pub type ShowId = i32;
pub type QuestionId = i32;
pub type CategoryId = i32;

pub trait FyyurStoreFacade {
    /// Get all venues, ordered by id, each with the number of its shows starting after `now`
    fn get_venue_summaries(
        &mut self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError>;
    /// Get all venues whose name contains the `search_term` (case-insensitive), ordered by id,
    /// each with the number of its shows starting after `now`
    fn search_venues(
        &mut self,
        search_term: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError>;
    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError>;
    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError>;
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError>;
    /// Delete the venue and all of its shows.
    ///
    /// Returns `Err(StoreError::NotExisting)` if there is no such venue.
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;

    /// Get all artists, ordered by id, each with the number of its shows starting after `now`
    fn get_artist_summaries(
        &mut self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError>;
    fn search_artists(
        &mut self,
        search_term: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError>;
    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError>;
    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError>;
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError>;
    /// Delete the artist and all of its shows.
    ///
    /// Returns `Err(StoreError::NotExisting)` if there is no such artist.
    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError>;

    /// Get a filtered list of shows, together with the display data of their venue and artist.
    ///
    /// Shows are returned in chronological order, i.e. sorted by (start_time, id)
    fn get_shows_filtered(&mut self, filter: ShowFilter)
        -> Result<Vec<models::FullShow>, StoreError>;
    /// Create a new show.
    ///
    /// Returns `Err(StoreError::InvalidInputData)` if the venue or the artist does not exist.
    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError>;

    /// Import venues, artists and shows in a single transaction. Returns the number of imported
    /// (venues, artists, shows).
    fn import_directory(
        &mut self,
        data: models::DirectoryImport,
    ) -> Result<(usize, usize, usize), StoreError>;
}

pub trait TriviaStoreFacade {
    /// Get all categories, ordered by id
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError>;
    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError>;

    /// Get a slice of all questions, ordered by id
    fn get_questions_page(
        &mut self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<models::Question>, StoreError>;
    fn count_questions(&mut self) -> Result<i64, StoreError>;
    fn get_questions_by_category(
        &mut self,
        category_id: CategoryId,
    ) -> Result<Vec<models::Question>, StoreError>;
    /// Get all questions whose text contains the `search_term` (case-insensitive), ordered by id
    fn search_questions(&mut self, search_term: &str)
        -> Result<Vec<models::Question>, StoreError>;
    /// Create a new question.
    ///
    /// Returns `Err(StoreError::InvalidInputData)` if the category does not exist.
    fn create_question(&mut self, question: models::NewQuestion)
        -> Result<QuestionId, StoreError>;
    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError>;

    /// Pick a random question, which is not in `previous_questions`.
    ///
    /// If `category_id` is given, only questions of this category are considered. Returns
    /// `Ok(None)` if no question is left.
    fn get_random_quiz_question(
        &mut self,
        category_id: Option<CategoryId>,
        previous_questions: &[QuestionId],
    ) -> Result<Option<models::Question>, StoreError>;

    /// Import questions in a single transaction. Returns the number of imported questions.
    fn import_questions(&mut self, questions: Vec<models::NewQuestion>)
        -> Result<usize, StoreError>;
}

/// Filter options for retrieving shows from the store via FyyurStoreFacade::get_shows_filtered()
///
/// Can be constructed through the ShowFilterBuilder
#[derive(Default, Debug, Clone)]
pub struct ShowFilter {
    /// Filter for shows that start strictly after the given point in time
    pub after: Option<chrono::DateTime<chrono::Utc>>,
    /// Filter for shows that start strictly before the given point in time
    pub before: Option<chrono::DateTime<chrono::Utc>>,
    /// Filter for shows at the given venue
    pub venue: Option<VenueId>,
    /// Filter for shows by the given artist
    pub artist: Option<ArtistId>,
}

impl ShowFilter {
    /// Checks if a given show matches the filter
    ///
    /// Usually, filtering should be done by the database. This function can be used for separate
    /// checks of individual shows in software.
    pub fn matches(&self, show: &models::Show) -> bool {
        if let Some(after) = self.after {
            if show.start_time <= after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if show.start_time >= before {
                return false;
            }
        }
        if let Some(venue) = self.venue {
            if show.venue_id != venue {
                return false;
            }
        }
        if let Some(artist) = self.artist {
            if show.artist_id != artist {
                return false;
            }
        }
        true
    }
}

/// Builder for constructing ShowFilter objects
pub struct ShowFilterBuilder {
    result: ShowFilter,
}

impl ShowFilterBuilder {
    pub fn new() -> Self {
        Self {
            result: ShowFilter::default(),
        }
    }

    /// Add filter, to only include shows that start after the given point in time (exclusive)
    pub fn after(&mut self, after: chrono::DateTime<chrono::Utc>) -> &mut Self {
        self.result.after = Some(after);
        self
    }
    /// Add filter, to only include shows that start before the given point in time (exclusive)
    pub fn before(&mut self, before: chrono::DateTime<chrono::Utc>) -> &mut Self {
        self.result.before = Some(before);
        self
    }
    pub fn at_venue(&mut self, venue: VenueId) -> &mut Self {
        self.result.venue = Some(venue);
        self
    }
    pub fn by_artist(&mut self, artist: ArtistId) -> &mut Self {
        self.result.artist = Some(artist);
        self
    }

    /// Create the ShowFilter object
    pub fn build(&self) -> ShowFilter {
        self.result.clone()
    }
}

pub trait FyyurStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError>;
}

pub trait TriviaStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation
                | e @ diesel::result::DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::InvalidInputData(format!("{:?}: {}", e, info.message())),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            Self::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}
