use crate::data_store::models::{
    Artist, Category, DirectoryImport, FullShow, ListingItem, NewArtist, NewQuestion, NewShow,
    NewVenue, Question, Show, Venue,
};
use crate::data_store::{
    ArtistId, CategoryId, FyyurStore, FyyurStoreFacade, QuestionId, ShowFilter, ShowId,
    StoreError, TriviaStore, TriviaStoreFacade, VenueId,
};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/**
 * A mock data store implementation for testing, implementing [FyyurStore] and [TriviaStore].
 *
 * The simulated database consists of the [StoreMockData] structure with vectors of entities. These
 * can be directly modified by the tests.
 *
 * Except from checking for entity existence, the interface functions of this mock don't do any
 * error checking. Instead, the [StoreMockData.next_error] attribute can be set to simulate a
 * database error.
 */
#[derive(Default)]
pub struct StoreMock {
    pub data: Mutex<StoreMockData>,
}

impl FyyurStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

impl TriviaStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn TriviaStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

#[derive(Default)]
pub struct StoreMockData {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
    pub shows: Vec<Show>,
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

impl StoreMockData {
    fn count_upcoming_shows(&self, now: DateTime<Utc>, of: impl Fn(&Show) -> bool) -> i64 {
        self.shows
            .iter()
            .filter(|s| s.start_time > now && of(s))
            .count() as i64
    }

    fn full_show(&self, show: &Show) -> Option<FullShow> {
        let venue = self.venues.iter().find(|v| v.id == show.venue_id)?;
        let artist = self.artists.iter().find(|a| a.id == show.artist_id)?;
        Some(FullShow {
            show: show.clone(),
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
        })
    }
}

fn next_id<T>(items: &[T], id: impl Fn(&T) -> i32) -> i32 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

struct StoreMockFacade<'a> {
    store: &'a StoreMock,
}

impl StoreMockFacade<'_> {
    fn lock_data(&self) -> Result<MutexGuard<StoreMockData>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        Ok(data)
    }

    fn venue_listing(
        &self,
        search_term: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingItem>, StoreError> {
        let data = self.lock_data()?;
        let mut result: Vec<ListingItem> = data
            .venues
            .iter()
            .filter(|v| search_term.map_or(true, |term| contains_case_insensitive(&v.name, term)))
            .map(|v| ListingItem {
                id: v.id,
                name: v.name.clone(),
                city: v.city.clone(),
                state: v.state.clone(),
                num_upcoming_shows: data.count_upcoming_shows(now, |s| s.venue_id == v.id),
            })
            .collect();
        result.sort_by_key(|item| item.id);
        Ok(result)
    }

    fn artist_listing(
        &self,
        search_term: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingItem>, StoreError> {
        let data = self.lock_data()?;
        let mut result: Vec<ListingItem> = data
            .artists
            .iter()
            .filter(|a| search_term.map_or(true, |term| contains_case_insensitive(&a.name, term)))
            .map(|a| ListingItem {
                id: a.id,
                name: a.name.clone(),
                city: a.city.clone(),
                state: a.state.clone(),
                num_upcoming_shows: data.count_upcoming_shows(now, |s| s.artist_id == a.id),
            })
            .collect();
        result.sort_by_key(|item| item.id);
        Ok(result)
    }
}

impl FyyurStoreFacade for StoreMockFacade<'_> {
    fn get_venue_summaries(&mut self, now: DateTime<Utc>) -> Result<Vec<ListingItem>, StoreError> {
        self.venue_listing(None, now)
    }

    fn search_venues(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingItem>, StoreError> {
        self.venue_listing(Some(search_term), now)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<Venue, StoreError> {
        let data = self.lock_data()?;
        data.venues
            .iter()
            .find(|v| v.id == venue_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn create_venue(&mut self, venue: NewVenue) -> Result<VenueId, StoreError> {
        let mut data = self.lock_data()?;
        let id = next_id(&data.venues, |v| v.id);
        data.venues.push(venue.into_venue(id));
        Ok(id)
    }

    fn update_venue(&mut self, venue_id: VenueId, venue: NewVenue) -> Result<(), StoreError> {
        let mut data = self.lock_data()?;
        let existing = data
            .venues
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = venue.into_venue(venue_id);
        Ok(())
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        let mut data = self.lock_data()?;
        if !data.venues.iter().any(|v| v.id == venue_id) {
            return Err(StoreError::NotExisting);
        }
        data.shows.retain(|s| s.venue_id != venue_id);
        data.venues.retain(|v| v.id != venue_id);
        Ok(())
    }

    fn get_artist_summaries(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingItem>, StoreError> {
        self.artist_listing(None, now)
    }

    fn search_artists(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingItem>, StoreError> {
        self.artist_listing(Some(search_term), now)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<Artist, StoreError> {
        let data = self.lock_data()?;
        data.artists
            .iter()
            .find(|a| a.id == artist_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn create_artist(&mut self, artist: NewArtist) -> Result<ArtistId, StoreError> {
        let mut data = self.lock_data()?;
        let id = next_id(&data.artists, |a| a.id);
        data.artists.push(artist.into_artist(id));
        Ok(id)
    }

    fn update_artist(&mut self, artist_id: ArtistId, artist: NewArtist) -> Result<(), StoreError> {
        let mut data = self.lock_data()?;
        let existing = data
            .artists
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = artist.into_artist(artist_id);
        Ok(())
    }

    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError> {
        let mut data = self.lock_data()?;
        if !data.artists.iter().any(|a| a.id == artist_id) {
            return Err(StoreError::NotExisting);
        }
        data.shows.retain(|s| s.artist_id != artist_id);
        data.artists.retain(|a| a.id != artist_id);
        Ok(())
    }

    fn get_shows_filtered(&mut self, filter: ShowFilter) -> Result<Vec<FullShow>, StoreError> {
        let data = self.lock_data()?;
        let mut result: Vec<FullShow> = data
            .shows
            .iter()
            .filter(|s| filter.matches(s))
            .filter_map(|s| data.full_show(s))
            .collect();
        result.sort_by_key(|s| (s.show.start_time, s.show.id));
        Ok(result)
    }

    fn create_show(&mut self, show: NewShow) -> Result<ShowId, StoreError> {
        let mut data = self.lock_data()?;
        if !data.venues.iter().any(|v| v.id == show.venue_id)
            || !data.artists.iter().any(|a| a.id == show.artist_id)
        {
            return Err(StoreError::InvalidInputData(
                "ForeignKeyViolation".to_owned(),
            ));
        }
        let id = next_id(&data.shows, |s| s.id);
        data.shows.push(Show {
            id,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        });
        Ok(id)
    }

    fn import_directory(
        &mut self,
        import: DirectoryImport,
    ) -> Result<(usize, usize, usize), StoreError> {
        let mut data = self.lock_data()?;
        let mut venue_ids = HashMap::new();
        let mut artist_ids = HashMap::new();
        let mut new_venues = Vec::new();
        let mut new_artists = Vec::new();
        let mut new_shows = Vec::new();
        let first_venue_id = next_id(&data.venues, |v| v.id);
        for (i, (source_id, venue)) in import.venues.into_iter().enumerate() {
            let id = first_venue_id + i as i32;
            venue_ids.insert(source_id, id);
            new_venues.push(venue.into_venue(id));
        }
        let first_artist_id = next_id(&data.artists, |a| a.id);
        for (i, (source_id, artist)) in import.artists.into_iter().enumerate() {
            let id = first_artist_id + i as i32;
            artist_ids.insert(source_id, id);
            new_artists.push(artist.into_artist(id));
        }
        let first_show_id = next_id(&data.shows, |s| s.id);
        for (i, show) in import.shows.into_iter().enumerate() {
            let (Some(venue_id), Some(artist_id)) =
                (venue_ids.get(&show.venue_id), artist_ids.get(&show.artist_id))
            else {
                return Err(StoreError::InvalidInputData(
                    "Show references unknown venue or artist".to_owned(),
                ));
            };
            new_shows.push(Show {
                id: first_show_id + i as i32,
                venue_id: *venue_id,
                artist_id: *artist_id,
                start_time: show.start_time,
            });
        }
        let counts = (new_venues.len(), new_artists.len(), new_shows.len());
        data.venues.extend(new_venues);
        data.artists.extend(new_artists);
        data.shows.extend(new_shows);
        Ok(counts)
    }
}

impl TriviaStoreFacade for StoreMockFacade<'_> {
    fn get_categories(&mut self) -> Result<Vec<Category>, StoreError> {
        let data = self.lock_data()?;
        let mut result = data.categories.clone();
        result.sort_by_key(|c| c.id);
        Ok(result)
    }

    fn get_category(&mut self, category_id: CategoryId) -> Result<Category, StoreError> {
        let data = self.lock_data()?;
        data.categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn get_questions_page(&mut self, offset: i64, limit: i64) -> Result<Vec<Question>, StoreError> {
        let data = self.lock_data()?;
        let mut result = data.questions.clone();
        result.sort_by_key(|q| q.id);
        Ok(result
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    fn count_questions(&mut self) -> Result<i64, StoreError> {
        let data = self.lock_data()?;
        Ok(data.questions.len() as i64)
    }

    fn get_questions_by_category(
        &mut self,
        category_id: CategoryId,
    ) -> Result<Vec<Question>, StoreError> {
        let data = self.lock_data()?;
        let mut result: Vec<Question> = data
            .questions
            .iter()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect();
        result.sort_by_key(|q| q.id);
        Ok(result)
    }

    fn search_questions(&mut self, search_term: &str) -> Result<Vec<Question>, StoreError> {
        let data = self.lock_data()?;
        let mut result: Vec<Question> = data
            .questions
            .iter()
            .filter(|q| contains_case_insensitive(&q.question, search_term))
            .cloned()
            .collect();
        result.sort_by_key(|q| q.id);
        Ok(result)
    }

    fn create_question(&mut self, question: NewQuestion) -> Result<QuestionId, StoreError> {
        let mut data = self.lock_data()?;
        if !data.categories.iter().any(|c| c.id == question.category) {
            return Err(StoreError::InvalidInputData(
                "ForeignKeyViolation".to_owned(),
            ));
        }
        let id = next_id(&data.questions, |q| q.id);
        data.questions.push(Question {
            id,
            question: question.question,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        });
        Ok(id)
    }

    fn delete_question(&mut self, question_id: QuestionId) -> Result<(), StoreError> {
        let mut data = self.lock_data()?;
        let len_before = data.questions.len();
        data.questions.retain(|q| q.id != question_id);
        if data.questions.len() == len_before {
            Err(StoreError::NotExisting)
        } else {
            Ok(())
        }
    }

    fn get_random_quiz_question(
        &mut self,
        category_id: Option<CategoryId>,
        previous_questions: &[QuestionId],
    ) -> Result<Option<Question>, StoreError> {
        let data = self.lock_data()?;
        let candidates: Vec<&Question> = data
            .questions
            .iter()
            .filter(|q| category_id.map_or(true, |c| q.category == c))
            .filter(|q| !previous_questions.contains(&q.id))
            .collect();
        Ok(candidates
            .choose(&mut rand::thread_rng())
            .map(|q| (*q).clone()))
    }

    fn import_questions(&mut self, questions: Vec<NewQuestion>) -> Result<usize, StoreError> {
        let count = questions.len();
        for question in questions {
            self.create_question(question)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue(id: VenueId, name: &str) -> Venue {
        Venue {
            id,
            name: name.to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            address: "1015 Folsom Street".to_owned(),
            phone: "".to_owned(),
            genres: vec!["Jazz".to_owned()],
            image_link: "".to_owned(),
            facebook_link: "".to_owned(),
            website: "".to_owned(),
            seeking_talent: false,
            seeking_description: "".to_owned(),
        }
    }

    #[test]
    fn test_num_upcoming_shows_excludes_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let store = StoreMock::default();
        {
            let mut data = store.data.lock().unwrap();
            data.venues.push(venue(1, "The Musical Hop"));
            for (id, offset) in [(1, -3600), (2, 0), (3, 3600), (4, 7200)] {
                data.shows.push(Show {
                    id,
                    venue_id: 1,
                    artist_id: 1,
                    start_time: now + chrono::Duration::seconds(offset),
                });
            }
        }
        let mut facade = FyyurStore::get_facade(&store).unwrap();
        let summaries = facade.get_venue_summaries(now).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_next_error_is_returned_once() {
        let store = StoreMock::default();
        store.data.lock().unwrap().next_error = Some(StoreError::TransactionConflict);
        let mut facade = TriviaStore::get_facade(&store).unwrap();
        assert!(matches!(
            facade.count_questions(),
            Err(StoreError::TransactionConflict)
        ));
        assert_eq!(facade.count_questions().unwrap(), 0);
    }
}
