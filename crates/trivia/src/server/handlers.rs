use crate::prelude::{ApiError, ApiResult};
use crate::store::{Store, StoreError};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trivia_core::pagination::{paginate, parse_page};
use trivia_core::question::{format_categories, Question, QuestionDraft};
use trivia_core::quiz::{select_next_question, CategoryFilter, NextQuestion, QuizRequest};
use trivia_core::search::{search_questions, SearchRequest};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

fn requested_page(query: Result<Query<PageQuery>, QueryRejection>) -> i64 {
    match query {
        Ok(Query(query)) => parse_page(query.page.as_deref()),
        Err(_) => 1,
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
    status: u16,
}

#[derive(Debug, Serialize)]
pub struct QuestionsPageResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_question: usize,
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    success: bool,
    question: NextQuestion,
}

/// GET /categories/
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<CategoriesResponse> {
    let categories = state.store.categories().map_err(|e| {
        log::error!("Failed to load categories: {e}");
        ApiError::Internal
    })?;

    Ok(Json(CategoriesResponse {
        categories: format_categories(&categories),
        status: 200,
    }))
}

/// GET /questions/?page=N
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<QuestionsPageResponse> {
    let page = requested_page(query);

    let questions = state.store.questions().map_err(|e| {
        log::error!("Failed to load questions: {e}");
        ApiError::Internal
    })?;

    let current = paginate(&questions, page);
    if current.is_empty() {
        log::debug!("Page {page} is empty ({} questions)", questions.len());
        return Err(ApiError::NotFound);
    }

    let categories = state.store.categories().map_err(|e| {
        log::error!("Failed to load categories: {e}");
        ApiError::Internal
    })?;

    Ok(Json(QuestionsPageResponse {
        success: true,
        questions: current,
        total_questions: questions.len(),
        categories: format_categories(&categories),
        current_category: None,
    }))
}

/// DELETE /questions/{question_id}
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let Path(question_id) = path.map_err(|_| ApiError::NotFound)?;

    match state.store.delete_question(question_id) {
        Ok(()) => {
            log::info!("Deleted question {question_id}");
            Ok(Json(DeleteResponse { success: true }))
        }
        Err(StoreError::NotFound(id)) => {
            log::warn!("Refusing to delete missing question {id}");
            Err(ApiError::Unprocessable)
        }
        Err(e) => {
            log::error!("Failed to delete question {question_id}: {e}");
            Err(ApiError::Unprocessable)
        }
    }
}

/// POST /add/?page=N
pub async fn create_question(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<QuestionDraft>, JsonRejection>,
) -> ApiResult<CreateResponse> {
    let Json(draft) = body.map_err(|e| {
        log::warn!("Rejected create body: {e}");
        ApiError::Unprocessable
    })?;

    let new_question = draft.validate().map_err(|e| {
        log::warn!("Rejected question: {e}");
        ApiError::Unprocessable
    })?;

    let created = state.store.insert_question(&new_question).map_err(|e| {
        log::error!("Failed to insert question: {e}");
        ApiError::Unprocessable
    })?;
    log::info!("Created question {created}");

    let questions = state.store.questions().map_err(|e| {
        log::error!("Failed to reload questions after insert: {e}");
        ApiError::Unprocessable
    })?;

    Ok(Json(CreateResponse {
        success: true,
        created,
        questions: paginate(&questions, requested_page(query)),
        total_question: questions.len(),
        message: "Question successfully created!",
    }))
}

/// POST /questions/search/
///
/// Zero matches answer 404 like every other empty listing.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<SearchResponse> {
    let Json(request) = body.map_err(|e| {
        log::warn!("Rejected search body: {e}");
        ApiError::NotFound
    })?;

    let questions = state.store.questions().map_err(|e| {
        log::error!("Failed to load questions for search: {e}");
        ApiError::NotFound
    })?;

    let results = search_questions(questions, request.term());
    if results.is_empty() {
        log::debug!("No questions match {:?}", request.term());
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResponse {
        success: true,
        total_questions: results.len(),
        questions: results,
        current_category: None,
    }))
}

/// GET /categories/{category_id}/questions
pub async fn questions_by_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<CategoryQuestionsResponse> {
    let Path(category_id) = path.map_err(|_| ApiError::NotFound)?;

    let questions = state
        .store
        .questions_in_category(category_id)
        .map_err(|e| {
            log::error!("Failed to load questions of category {category_id}: {e}");
            ApiError::Internal
        })?;

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        total_questions: questions.len(),
        questions,
        current_category: category_id,
    }))
}

/// POST /play/
pub async fn play_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<QuizResponse> {
    let Json(request) = body.map_err(|e| {
        log::warn!("Rejected quiz body: {e}");
        ApiError::Internal
    })?;

    let filter = request.filter();
    let previous = request.previous_ids();

    let questions = match filter {
        CategoryFilter::Any => state.store.questions(),
        CategoryFilter::Category(id) => match state.store.category(id) {
            Ok(Some(_)) => state.store.questions_in_category(id),
            Ok(None) => {
                log::debug!("Quiz requested for unknown category {id}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        },
    }
    .map_err(|e| {
        log::error!("Failed to load quiz candidates: {e}");
        ApiError::Internal
    })?;

    let question = select_next_question(questions, filter, &previous, &mut rand::thread_rng());

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
