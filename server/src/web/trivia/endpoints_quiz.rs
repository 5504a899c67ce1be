use crate::web::trivia::APIError;
use crate::web::TriviaAppState;
use actix_web::{post, web, Responder};
use fsnd_api_types::{QuizRequest, QuizResponse, ALL_CATEGORIES};

/// Pick the next quiz question: a random question of the requested category, which has not been
/// asked before. When no question is left, the quiz is complete and `question` is null.
#[post("/quizzes")]
async fn next_quiz_question(
    data: web::Json<QuizRequest>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let request = data.into_inner();
    let previous_questions = request
        .previous_questions
        .ok_or_else(|| APIError::BadRequest("previous_questions missing".to_owned()))?;
    let quiz_category = request
        .quiz_category
        .ok_or_else(|| APIError::BadRequest("quiz_category missing".to_owned()))?;
    let category_id = if quiz_category.id == ALL_CATEGORIES {
        None
    } else {
        Some(quiz_category.id)
    };

    let question = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        if let Some(category_id) = category_id {
            store.get_category(category_id)?;
        }
        Ok(store.get_random_quiz_question(category_id, &previous_questions)?)
    })
    .await??;

    Ok(web::Json(QuizResponse {
        success: true,
        question: question.map(|q| q.into()),
    }))
}
