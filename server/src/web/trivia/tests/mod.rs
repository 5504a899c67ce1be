
use super::*;
use crate::data_store::store_mock::StoreMock;
use crate::web::TriviaAppState;
use actix_web::{http, test, App};
use fsnd_api_types::{
    CategoriesResponse, CategoryQuestionsResponse, ErrorResponse, QuestionCreatedResponse,
    QuestionDeletedResponse, QuestionsPageResponse, QuizResponse, SearchResponse,
};
use serde_json::json;
use std::sync::Arc;

fn create_state() -> (Arc<StoreMock>, TriviaAppState) {
    let data_store_mock = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(&data_store_mock);
    let state = TriviaAppState {
        store: data_store_mock.clone(),
    };
    (data_store_mock, state)
}

#[actix_web::test]
async fn test_list_categories() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("Access-Control-Allow-Origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let result: CategoriesResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.categories.len(), 6);
    assert_eq!(result.categories.get(&4).map(String::as_str), Some("History"));
}

#[actix_web::test]
async fn test_list_questions_pages() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/questions").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionsPageResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.questions.len(), 10);
    assert_eq!(result.questions[0].id, 2);
    assert_eq!(result.total_questions, 15);
    assert_eq!(result.categories.len(), 6);
    assert!(result.current_category.is_none());

    let req = test::TestRequest::get().uri("/questions?page=2").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionsPageResponse = test::read_body_json(res).await;
    assert_eq!(result.questions.len(), 5);
    assert_eq!(result.questions[4].id, 21);
    assert_eq!(result.total_questions, 15);
}

#[actix_web::test]
async fn test_list_questions_page_out_of_range() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    for uri in [
        "/questions?page=100",
        "/questions?page=0",
        "/questions?page=9223372036854775807",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
        let result: ErrorResponse = test::read_body_json(res).await;
        assert!(!result.success);
        assert_eq!(result.error, 404);
        assert!(!result.message.is_empty());
    }

    let req = test::TestRequest::get()
        .uri("/questions?page=abc")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_questions_of_category() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/categories/4/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: CategoryQuestionsResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.total_questions, 2);
    assert!(result.questions.iter().all(|q| q.category == 4));
    assert_eq!(result.current_category, "History");

    let req = test::TestRequest::get()
        .uri("/categories/100/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert!(!result.success);
}

#[actix_web::test]
async fn test_delete_question() {
    let (store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::delete().uri("/questions/17").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionDeletedResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.deleted, 17);
    assert_eq!(result.total_questions, 14);
    assert_eq!(result.questions.len(), 10);
    assert!(!store
        .data
        .lock()
        .unwrap()
        .questions
        .iter()
        .any(|q| q.id == 17));

    let req = test::TestRequest::delete().uri("/questions/17").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_question() {
    let (store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({
            "question": "Question Z?",
            "answer": "Answer for this question",
            "category": "5",
            "difficulty": 4,
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuestionCreatedResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.created, 22);
    assert_eq!(result.total_questions, 16);
    let data = store.data.lock().unwrap();
    let created = data.questions.iter().find(|q| q.id == 22).unwrap();
    assert_eq!(created.category, 5);
    assert_eq!(created.difficulty, 4);
}

#[actix_web::test]
async fn test_create_question_unprocessable() {
    let (store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let invalid_questions = [
        json!({"question": "Question Z?", "answer": "Answer", "category": "5", "difficulty": "'4'"}),
        json!({"question": "", "answer": "", "category": "5", "difficulty": 4}),
        json!({"question": "Question Z?", "answer": "Answer", "category": 5, "difficulty": 9}),
        json!({"question": "Question Z?", "answer": "Answer", "category": 100, "difficulty": 2}),
    ];
    for question in invalid_questions {
        let req = test::TestRequest::post()
            .uri("/questions")
            .set_json(question)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        let result: ErrorResponse = test::read_body_json(res).await;
        assert!(!result.success);
        assert_eq!(result.error, 422);
        assert!(!result.message.is_empty());
    }
    assert_eq!(store.data.lock().unwrap().questions.len(), 15);
}

#[actix_web::test]
async fn test_malformed_requests() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/questions")
        .insert_header(http::header::ContentType::json())
        .set_payload("{\"question\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/questions")
        .insert_header(http::header::ContentType::plaintext())
        .set_payload("Question Z?")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let req = test::TestRequest::put().uri("/questions").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(result.error, 405);

    let req = test::TestRequest::get().uri("/answers").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert!(!result.success);

    let req = test::TestRequest::default()
        .method(http::Method::OPTIONS)
        .uri("/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert!(res
        .headers()
        .contains_key("Access-Control-Allow-Methods"));
}

#[actix_web::test]
async fn test_search_questions() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({"searchTerm": "Title"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: SearchResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert_eq!(result.total_questions, 1);
    assert_eq!(result.questions[0].id, 6);

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({"searchTerm": "xyz"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/questions/search")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let result: ErrorResponse = test::read_body_json(res).await;
    assert!(!result.success);
}

#[actix_web::test]
async fn test_quiz_next_question() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"previous_questions": [5, 9], "quiz_category": {"type": "History", "id": 4}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuizResponse = test::read_body_json(res).await;
    assert!(result.success);
    let question = result.question.unwrap();
    assert_eq!(question.category, 4);

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"previous_questions": [], "quiz_category": {"type": "click", "id": 0}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuizResponse = test::read_body_json(res).await;
    assert!(result.question.is_some());
}

#[actix_web::test]
async fn test_quiz_complete() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"previous_questions": [13, 14, 15], "quiz_category": {"type": "Geography", "id": "3"}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: QuizResponse = test::read_body_json(res).await;
    assert!(result.success);
    assert!(result.question.is_none());
}

#[actix_web::test]
async fn test_quiz_bad_requests() {
    let (_store, state) = create_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let bad_requests = [
        json!({"quiz_category": {"type": "click", "id": 0}}),
        json!({"previous_questions": []}),
    ];
    for body in bad_requests {
        let req = test::TestRequest::post()
            .uri("/quizzes")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);
        let result: ErrorResponse = test::read_body_json(res).await;
        assert!(!result.success);
        assert!(!result.message.is_empty());
    }

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"previous_questions": [], "quiz_category": {"type": "Unknown", "id": 42}}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}
