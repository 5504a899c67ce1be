use crate::web::fyyur::form_values::{FormValueRepresentation, ValidateFromFormInput};
use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use std::fmt::Debug;

/// Maximum length (in characters) of the short text and link columns of venues and artists
pub const MAX_TEXT_LENGTH: usize = 120;
/// Maximum length (in characters) of the image link columns
pub const MAX_IMAGE_LINK_LENGTH: usize = 500;

fn check_max_length(value: &str, max_length: usize) -> Result<(), String> {
    if value.chars().count() > max_length {
        Err(format!("Must be at most {} characters long.", max_length))
    } else {
        Ok(())
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for NonEmptyString {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for NonEmptyString {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            Err("This field is required.".to_owned())
        } else {
            Ok(NonEmptyString(value.to_owned()))
        }
    }
}

/// A non-empty string of at most [MAX_TEXT_LENGTH] characters, e.g. a city or address
#[derive(Default, Debug, PartialEq)]
pub struct ShortText(pub String);

impl ShortText {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for ShortText {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for ShortText {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let NonEmptyString(value) = NonEmptyString::from_form_value(value)?;
        check_max_length(&value, MAX_TEXT_LENGTH)?;
        Ok(ShortText(value))
    }
}

/// Two-letter codes of the US states, which are offered in the venue and artist forms.
pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

#[derive(Default, Debug, PartialEq)]
pub struct UsState(pub String);

impl UsState {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for UsState {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for UsState {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim().to_uppercase();
        if US_STATES.contains(&value.as_str()) {
            Ok(UsState(value))
        } else {
            Err("Not a valid choice.".to_owned())
        }
    }
}

/// An optional US phone number in the format `NNN-NNN-NNNN`
#[derive(Default, Debug, PartialEq)]
pub struct Phone(pub String);

impl Phone {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for Phone {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for Phone {
    fn from_form_value(value: &str) -> Result<Self, String> {
        lazy_static! {
            static ref RE: regex::Regex = regex::Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
        }
        let value = value.trim();
        if value.is_empty() || RE.is_match(value) {
            Ok(Phone(value.to_owned()))
        } else {
            Err("Invalid phone number. Expected format: 123-456-7890".to_owned())
        }
    }
}

pub const GENRES: [&str; 20] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

/// A non-empty list of music genres, entered as comma-separated list
///
/// Each genre must be one of [GENRES]. Matching is case-insensitive, the canonical spelling is
/// stored.
#[derive(Default, Debug, PartialEq)]
pub struct Genres(pub Vec<String>);

impl Genres {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FormValueRepresentation for Genres {
    fn into_form_value_string(self) -> String {
        self.0.join(", ")
    }
}
impl ValidateFromFormInput for Genres {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let genres = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|genre| {
                GENRES
                    .iter()
                    .find(|g| g.eq_ignore_ascii_case(genre))
                    .map(|g| g.to_string())
                    .ok_or_else(|| format!("Unknown genre '{}'.", genre))
            })
            .collect::<Result<Vec<String>, String>>()?;
        if genres.is_empty() {
            return Err("At least one genre is required.".to_owned());
        }
        Ok(Genres(genres))
    }
}

fn parse_optional_http_url(value: &str, max_length: usize) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    check_max_length(value, max_length)?;
    let url = url::Url::parse(value).map_err(|e| format!("Invalid URL: {}", e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err("Only http and https URLs are allowed.".to_owned());
    }
    Ok(value.to_owned())
}

/// An optional absolute http(s) URL of at most [MAX_TEXT_LENGTH] characters, e.g. a website
#[derive(Default, Debug, PartialEq)]
pub struct OptionalUrl(pub String);

impl OptionalUrl {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for OptionalUrl {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for OptionalUrl {
    fn from_form_value(value: &str) -> Result<Self, String> {
        parse_optional_http_url(value, MAX_TEXT_LENGTH).map(OptionalUrl)
    }
}

/// An optional absolute http(s) image URL of at most [MAX_IMAGE_LINK_LENGTH] characters
#[derive(Default, Debug, PartialEq)]
pub struct OptionalImageUrl(pub String);

impl OptionalImageUrl {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for OptionalImageUrl {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for OptionalImageUrl {
    fn from_form_value(value: &str) -> Result<Self, String> {
        parse_optional_http_url(value, MAX_IMAGE_LINK_LENGTH).map(OptionalImageUrl)
    }
}

/// Start time of a show in UTC, entered as `YYYY-MM-DD HH:MM[:SS]` (or with `T` as separator)
#[derive(Debug, PartialEq)]
pub struct ShowStartTime(pub DateTime<Utc>);

impl ShowStartTime {
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl FormValueRepresentation for ShowStartTime {
    fn into_form_value_string(self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
impl ValidateFromFormInput for ShowStartTime {
    fn from_form_value(value: &str) -> Result<Self, String> {
        const FORMATS: [&str; 4] = [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ];
        let value = value.trim();
        FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|t| ShowStartTime(t.and_utc()))
            .ok_or_else(|| "Not a valid date and time. Expected YYYY-MM-DD HH:MM.".to_owned())
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct Int32(pub i32);

impl Int32 {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FormValueRepresentation for Int32 {
    fn into_form_value_string(self) -> String {
        self.0.to_string()
    }
}

impl ValidateFromFormInput for Int32 {
    fn from_form_value(value: &str) -> Result<Self, String> {
        value
            .trim()
            .parse()
            .map(Int32)
            .map_err(|_| "Not a valid integer value.".to_owned())
    }
}
