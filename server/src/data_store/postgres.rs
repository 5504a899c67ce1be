use super::util::substring_like_pattern;
use super::{
    models, schema, ArtistId, CategoryId, FyyurStore, FyyurStoreFacade, QuestionId, ShowFilter,
    ShowId, StoreError, TriviaStore, TriviaStoreFacade, VenueId,
};
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl FyyurStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

impl TriviaStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

type ListingRow = (i32, String, String, String);

fn rows_to_listing_items(
    rows: Vec<ListingRow>,
    upcoming_counts: HashMap<i32, i64>,
) -> Vec<models::ListingItem> {
    rows.into_iter()
        .map(|(id, name, city, state)| models::ListingItem {
            id,
            name,
            city,
            state,
            num_upcoming_shows: upcoming_counts.get(&id).copied().unwrap_or(0),
        })
        .collect()
}

fn venue_listing(
    connection: &mut PgConnection,
    search_term: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Vec<models::ListingItem>, StoreError> {
    use schema::venues::dsl::*;

    connection.transaction(|connection| {
        let mut query = venues
            .order_by(id.asc())
            .select((id, name, city, state))
            .into_boxed();
        if let Some(search_term) = search_term {
            query = query.filter(name.ilike(substring_like_pattern(search_term)));
        }
        let rows = query.load::<ListingRow>(connection)?;

        let venue_ids: Vec<VenueId> = rows.iter().map(|r| r.0).collect();
        let upcoming_counts = schema::shows::table
            .filter(schema::shows::start_time.gt(now))
            .filter(schema::shows::venue_id.eq_any(venue_ids))
            .group_by(schema::shows::venue_id)
            .select((schema::shows::venue_id, diesel::dsl::count_star()))
            .load::<(VenueId, i64)>(connection)?
            .into_iter()
            .collect();

        Ok(rows_to_listing_items(rows, upcoming_counts))
    })
}

fn artist_listing(
    connection: &mut PgConnection,
    search_term: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Vec<models::ListingItem>, StoreError> {
    use schema::artists::dsl::*;

    connection.transaction(|connection| {
        let mut query = artists
            .order_by(id.asc())
            .select((id, name, city, state))
            .into_boxed();
        if let Some(search_term) = search_term {
            query = query.filter(name.ilike(substring_like_pattern(search_term)));
        }
        let rows = query.load::<ListingRow>(connection)?;

        let artist_ids: Vec<ArtistId> = rows.iter().map(|r| r.0).collect();
        let upcoming_counts = schema::shows::table
            .filter(schema::shows::start_time.gt(now))
            .filter(schema::shows::artist_id.eq_any(artist_ids))
            .group_by(schema::shows::artist_id)
            .select((schema::shows::artist_id, diesel::dsl::count_star()))
            .load::<(ArtistId, i64)>(connection)?
            .into_iter()
            .collect();

        Ok(rows_to_listing_items(rows, upcoming_counts))
    })
}

impl FyyurStoreFacade for PgDataStoreFacade {
    fn get_venue_summaries(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError> {
        venue_listing(&mut self.connection, None, now)
    }

    fn search_venues(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError> {
        venue_listing(&mut self.connection, Some(search_term), now)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError> {
        use schema::venues::dsl::*;

        venues
            .filter(id.eq(venue_id))
            .select(models::Venue::as_select())
            .first::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError> {
        use schema::venues::dsl::*;

        Ok(diesel::insert_into(venues)
            .values(&venue)
            .returning(id)
            .get_result::<VenueId>(&mut self.connection)?)
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        let result = diesel::update(venues)
            .filter(id.eq(venue_id))
            .set(&venue)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            diesel::delete(schema::shows::table)
                .filter(schema::shows::venue_id.eq(venue_id))
                .execute(connection)?;
            let count = diesel::delete(venues)
                .filter(id.eq(venue_id))
                .execute(connection)?;
            if count == 1 {
                Ok(())
            } else {
                Err(StoreError::NotExisting)
            }
        })
    }

    fn get_artist_summaries(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError> {
        artist_listing(&mut self.connection, None, now)
    }

    fn search_artists(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::ListingItem>, StoreError> {
        artist_listing(&mut self.connection, Some(search_term), now)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError> {
        use schema::artists::dsl::*;

        artists
            .filter(id.eq(artist_id))
            .select(models::Artist::as_select())
            .first::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError> {
        use schema::artists::dsl::*;

        Ok(diesel::insert_into(artists)
            .values(&artist)
            .returning(id)
            .get_result::<ArtistId>(&mut self.connection)?)
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        let result = diesel::update(artists)
            .filter(id.eq(artist_id))
            .set(&artist)
            .execute(&mut self.connection)?;
        if result == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            diesel::delete(schema::shows::table)
                .filter(schema::shows::artist_id.eq(artist_id))
                .execute(connection)?;
            let count = diesel::delete(artists)
                .filter(id.eq(artist_id))
                .execute(connection)?;
            if count == 1 {
                Ok(())
            } else {
                Err(StoreError::NotExisting)
            }
        })
    }

    fn get_shows_filtered(
        &mut self,
        filter: ShowFilter,
    ) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::{artists, shows, venues};

        let mut query = shows::table
            .inner_join(venues::table)
            .inner_join(artists::table)
            .order_by((shows::start_time.asc(), shows::id.asc()))
            .select((
                models::Show::as_select(),
                venues::name,
                venues::image_link,
                artists::name,
                artists::image_link,
            ))
            .into_boxed();
        if let Some(after) = filter.after {
            query = query.filter(shows::start_time.gt(after));
        }
        if let Some(before) = filter.before {
            query = query.filter(shows::start_time.lt(before));
        }
        if let Some(venue) = filter.venue {
            query = query.filter(shows::venue_id.eq(venue));
        }
        if let Some(artist) = filter.artist {
            query = query.filter(shows::artist_id.eq(artist));
        }

        Ok(query
            .load::<(models::Show, String, String, String, String)>(&mut self.connection)?
            .into_iter()
            .map(
                |(show, venue_name, venue_image_link, artist_name, artist_image_link)| {
                    models::FullShow {
                        show,
                        venue_name,
                        venue_image_link,
                        artist_name,
                        artist_image_link,
                    }
                },
            )
            .collect())
    }

    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError> {
        use schema::shows::dsl::*;

        Ok(diesel::insert_into(shows)
            .values(&show)
            .returning(id)
            .get_result::<ShowId>(&mut self.connection)?)
    }

    fn import_directory(
        &mut self,
        data: models::DirectoryImport,
    ) -> Result<(usize, usize, usize), StoreError> {
        self.connection.transaction(|connection| {
            let mut venue_ids = HashMap::new();
            for (source_id, venue) in data.venues.iter() {
                let new_id = diesel::insert_into(schema::venues::table)
                    .values(venue)
                    .returning(schema::venues::id)
                    .get_result::<VenueId>(connection)?;
                venue_ids.insert(*source_id, new_id);
            }
            let mut artist_ids = HashMap::new();
            for (source_id, artist) in data.artists.iter() {
                let new_id = diesel::insert_into(schema::artists::table)
                    .values(artist)
                    .returning(schema::artists::id)
                    .get_result::<ArtistId>(connection)?;
                artist_ids.insert(*source_id, new_id);
            }
            let shows = data
                .shows
                .iter()
                .map(|show| {
                    Ok(models::NewShow {
                        venue_id: *venue_ids.get(&show.venue_id).ok_or_else(|| {
                            StoreError::InvalidInputData(format!(
                                "Show references unknown venue {}",
                                show.venue_id
                            ))
                        })?,
                        artist_id: *artist_ids.get(&show.artist_id).ok_or_else(|| {
                            StoreError::InvalidInputData(format!(
                                "Show references unknown artist {}",
                                show.artist_id
                            ))
                        })?,
                        start_time: show.start_time,
                    })
                })
                .collect::<Result<Vec<_>, StoreError>>()?;
            diesel::insert_into(schema::shows::table)
                .values(&shows)
                .execute(connection)?;

            Ok((venue_ids.len(), artist_ids.len(), shows.len()))
        })
    }
}

impl TriviaStoreFacade for PgDataStoreFacade {
    fn get_categories(&mut self) -> Result<Vec<models::Category>, StoreError> {
        use schema::categories::dsl::*;

        categories
            .order_by(id.asc())
            .select(models::Category::as_select())
            .load::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_category(&mut self, category_id: CategoryId) -> Result<models::Category, StoreError> {
        use schema::categories::dsl::*;

        categories
            .filter(id.eq(category_id))
            .select(models::Category::as_select())
            .first::<models::Category>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_questions_page(
        &mut self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        questions
            .order_by(id.asc())
            .offset(offset)
            .limit(limit)
            .select(models::Question::as_select())
            .load::<models::Question>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn count_questions(&mut self) -> Result<i64, StoreError> {
        use schema::questions::dsl::*;

        questions
            .count()
            .get_result::<i64>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_questions_by_category(
        &mut self,
        category_id: CategoryId,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        questions
            .filter(category.eq(category_id))
            .order_by(id.asc())
            .select(models::Question::as_select())
            .load::<models::Question>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn search_questions(
        &mut self,
        search_term: &str,
    ) -> Result<Vec<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        questions
            .filter(question.ilike(substring_like_pattern(search_term)))
            .order_by(id.asc())
            .select(models::Question::as_select())
            .load::<models::Question>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_question(
        &mut self,
        new_question: models::NewQuestion,
    ) -> Result<QuestionId, StoreError> {
        use schema::questions::dsl::*;

        Ok(diesel::insert_into(questions)
            .values(&new_question)
            .returning(id)
            .get_result::<QuestionId>(&mut self.connection)?)
    }

    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError> {
        use schema::questions::dsl::*;

        let count = diesel::delete(questions)
            .filter(id.eq(question_id))
            .execute(&mut self.connection)?;
        if count == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn get_random_quiz_question(
        &mut self,
        category_id: Option<CategoryId>,
        previous_questions: &[QuestionId],
    ) -> Result<Option<models::Question>, StoreError> {
        use schema::questions::dsl::*;

        let mut query = questions
            .filter(id.ne_all(previous_questions.to_vec()))
            .order(diesel::dsl::sql::<diesel::sql_types::Double>("RANDOM()"))
            .select(models::Question::as_select())
            .into_boxed();
        if let Some(category_id) = category_id {
            query = query.filter(category.eq(category_id));
        }
        query
            .first::<models::Question>(&mut self.connection)
            .optional()
            .map_err(|e| e.into())
    }

    fn import_questions(
        &mut self,
        new_questions: Vec<models::NewQuestion>,
    ) -> Result<usize, StoreError> {
        use schema::questions::dsl::*;

        self.connection.transaction(|connection| {
            Ok(diesel::insert_into(questions)
                .values(&new_questions)
                .execute(connection)?)
        })
    }
}
