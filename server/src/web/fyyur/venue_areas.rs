use crate::data_store::models::ListingItem;

/// All venues of one city, for the grouped venue listing
#[derive(Debug, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingItem>,
}

/// Group the venue listing by distinct (city, state) pairs.
///
/// The order of the venues is kept within each area. The areas are ordered by their first venue's
/// position in the input list. City names are compared exactly, as stored.
pub fn group_by_area(venues: Vec<ListingItem>) -> Vec<VenueArea> {
    let mut result: Vec<VenueArea> = Vec::new();
    for venue in venues {
        match result
            .iter_mut()
            .find(|area| area.city == venue.city && area.state == venue.state)
        {
            Some(area) => area.venues.push(venue),
            None => result.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![venue],
            }),
        }
    }
    result
}
