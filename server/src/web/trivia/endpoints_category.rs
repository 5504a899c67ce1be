use crate::data_store::models::Category;
use crate::data_store::CategoryId;
use crate::web::trivia::APIError;
use crate::web::TriviaAppState;
use actix_web::{get, web, Responder};
use fsnd_api_types::{CategoriesResponse, CategoryMap, CategoryQuestionsResponse};

/// Convert the list of categories into the id → type mapping used by the quiz frontend
pub(super) fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|c| (c.id, c.category_type))
        .collect()
}

#[get("/categories")]
async fn list_categories(state: web::Data<TriviaAppState>) -> Result<impl Responder, APIError> {
    let categories = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_categories()?)
    })
    .await??;

    Ok(web::Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

#[get("/categories/{category_id}/questions")]
async fn list_questions_of_category(
    path: web::Path<CategoryId>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let category_id = path.into_inner();
    let (category, questions) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let category = store.get_category(category_id)?;
        Ok((category, store.get_questions_by_category(category_id)?))
    })
    .await??;

    Ok(web::Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len() as i64,
        questions: questions.into_iter().map(|q| q.into()).collect(),
        current_category: category.category_type,
    }))
}
