use crate::data_store::{models, QuestionId, StoreError};
use crate::web::trivia::endpoints_category::category_map;
use crate::web::trivia::{page_slice, APIError, QUESTIONS_PER_PAGE};
use crate::web::TriviaAppState;
use actix_web::{delete, get, post, web, Responder};
use fsnd_api_types::{
    NewQuestion, QuestionCreatedResponse, QuestionDeletedResponse, QuestionsPageResponse,
    SearchRequest, SearchResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page")]
    page: i64,
}

fn first_page() -> i64 {
    1
}

#[get("/questions")]
async fn list_questions(
    query: web::Query<PageQuery>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let (offset, limit) = page_slice(query.page).ok_or(APIError::NotExisting)?;
    let (questions, total_questions, categories) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_questions_page(offset, limit)?,
            store.count_questions()?,
            store.get_categories()?,
        ))
    })
    .await??;

    if questions.is_empty() {
        return Err(APIError::NotExisting);
    }

    Ok(web::Json(QuestionsPageResponse {
        success: true,
        questions: questions.into_iter().map(|q| q.into()).collect(),
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

#[post("/questions/search")]
async fn search_questions(
    data: web::Json<SearchRequest>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let search_term = data.into_inner().search_term;
    let questions = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.search_questions(&search_term)?)
    })
    .await??;

    if questions.is_empty() {
        return Err(APIError::NotExisting);
    }

    Ok(web::Json(SearchResponse {
        success: true,
        total_questions: questions.len() as i64,
        questions: questions.into_iter().map(|q| q.into()).collect(),
    }))
}

fn validate_new_question(question: &NewQuestion) -> Result<(), APIError> {
    if question.question.trim().is_empty() {
        return Err(APIError::InvalidData("question must not be empty".to_owned()));
    }
    if question.answer.trim().is_empty() {
        return Err(APIError::InvalidData("answer must not be empty".to_owned()));
    }
    if !(1..=5).contains(&question.difficulty) {
        return Err(APIError::InvalidData(
            "difficulty must be between 1 and 5".to_owned(),
        ));
    }
    Ok(())
}

#[post("/questions")]
async fn create_question(
    data: web::Json<NewQuestion>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let question = data.into_inner();
    validate_new_question(&question)?;
    let (created, questions, total_questions) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        match store.get_category(question.category) {
            Err(StoreError::NotExisting) => {
                return Err(APIError::InvalidData(format!(
                    "category {} does not exist",
                    question.category
                )))
            }
            result => result?,
        };
        let created = store.create_question(models::NewQuestion::from(question))?;
        Ok((
            created,
            store.get_questions_page(0, QUESTIONS_PER_PAGE)?,
            store.count_questions()?,
        ))
    })
    .await??;

    Ok(web::Json(QuestionCreatedResponse {
        success: true,
        created,
        questions: questions.into_iter().map(|q| q.into()).collect(),
        total_questions,
    }))
}

#[delete("/questions/{question_id}")]
async fn delete_question(
    path: web::Path<QuestionId>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let question_id = path.into_inner();
    let (questions, total_questions) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        store.delete_question(question_id)?;
        Ok((
            store.get_questions_page(0, QUESTIONS_PER_PAGE)?,
            store.count_questions()?,
        ))
    })
    .await??;

    Ok(web::Json(QuestionDeletedResponse {
        success: true,
        deleted: question_id,
        questions: questions.into_iter().map(|q| q.into()).collect(),
        total_questions,
    }))
}
