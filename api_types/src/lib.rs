//! Request and response types of the Trivia JSON API
//!
//! Field names follow the wire format expected by the Trivia quiz frontend, which is why some of
//! them are renamed (e.g. `searchTerm`) or use a keyword as JSON name (`type`).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub type CategoryMap = BTreeMap<i32, String>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    /// Must be a JSON integer. Strings are rejected on purpose, to report them as unprocessable.
    pub difficulty: i32,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub category: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// Request body of `POST /quizzes`
///
/// Both fields are optional on the wire, so the endpoint can answer a missing field with
/// "400 Bad Request" instead of a generic deserialization error.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

/// The quiz category as sent by the frontend. `id == 0` means "all categories".
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub category_type: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub id: i32,
}

pub const ALL_CATEGORIES: i32 = 0;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionsPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: i32,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: i32,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

/// Response of `POST /quizzes`. `question` is `None` when the quiz is complete.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// Accept an integer either as JSON number or as a string containing a decimal number.
///
/// The quiz frontend takes category ids from the keys of the `categories` object, so they arrive
/// as strings.
fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i32),
        String(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => Ok(v),
        IntOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{}' is not a valid integer id", s))),
    }
}
