use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{Advance, QuizError, QuizSession, QuizState, Recommender, QUIZ_STEPS};
use crate::models::{
    ErrorResponse, FindRecommendationsRequest, FindRecommendationsResponse, HealthResponse,
    ProductCard, QuizProgressResponse, RecommendationResponse, RecommendationResult,
    RecordAnswerRequest, SessionRequest,
};
use crate::services::{CacheKey, CacheManager, CatalogClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CacheManager>,
    pub recommender: Recommender,
    pub shortlist_size: usize,
}

/// Configure all quiz and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/quiz/start", web::post().to(start_quiz))
        .route("/quiz/answer", web::post().to(record_answer))
        .route("/quiz/next", web::post().to(next_step))
        .route("/quiz/previous", web::post().to(previous_step))
        .route("/quiz/retake", web::post().to(retake_quiz))
        .route("/quiz/results", web::get().to(get_results))
        .route("/recommendations/find", web::post().to(find_recommendations));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cache_healthy = state.cache.ping().await.is_ok();
    let status = if cache_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn progress(session_id: &str, session: &QuizSession) -> QuizProgressResponse {
    let state = match session.state() {
        QuizState::Step(_) => "step",
        QuizState::Submitting => "submitting",
        QuizState::Results => "results",
    };

    QuizProgressResponse {
        session_id: session_id.to_string(),
        state: state.to_string(),
        step: session.current_step(),
        step_index: session.step_index(),
        total_steps: QUIZ_STEPS.len(),
    }
}

fn quiz_error_response(err: &QuizError) -> HttpResponse {
    let (status_code, builder_status) = match err {
        QuizError::StepIncomplete(_) | QuizError::AnswerMismatch { .. } => {
            (400, HttpResponse::BadRequest())
        }
        QuizError::InvalidTransition => (409, HttpResponse::Conflict()),
    };
    let mut builder = builder_status;
    builder.json(ErrorResponse {
        error: "quiz_error".to_string(),
        message: err.to_string(),
        status_code,
        retryable: false,
    })
}

async fn load_session(state: &AppState, session_id: &str) -> Result<QuizSession, HttpResponse> {
    match state
        .cache
        .get::<QuizSession>(&CacheKey::session(session_id))
        .await
    {
        Ok(session) => Ok(session),
        Err(e) => {
            tracing::info!("Quiz session {} not found: {}", session_id, e);
            Err(HttpResponse::NotFound().json(ErrorResponse {
                error: "session_not_found".to_string(),
                message: format!("No quiz session with id {}", session_id),
                status_code: 404,
                retryable: false,
            }))
        }
    }
}

async fn store_session(
    state: &AppState,
    session_id: &str,
    session: &QuizSession,
) -> Result<(), HttpResponse> {
    if let Err(e) = state
        .cache
        .set(&CacheKey::session(session_id), session)
        .await
    {
        tracing::error!("Failed to store quiz session {}: {}", session_id, e);
        return Err(HttpResponse::InternalServerError().json(ErrorResponse {
            error: "session_store_failed".to_string(),
            message: e.to_string(),
            status_code: 500,
            retryable: true,
        }));
    }
    Ok(())
}

/// Start a new quiz session
///
/// POST /api/v1/quiz/start
async fn start_quiz(state: web::Data<AppState>) -> impl Responder {
    let session_id = uuid::Uuid::new_v4().to_string();
    let session = QuizSession::new();

    if let Err(response) = store_session(&state, &session_id, &session).await {
        return response;
    }

    tracing::info!("Started quiz session {}", session_id);
    HttpResponse::Ok().json(progress(&session_id, &session))
}

/// Record an answer for the session's current step
///
/// POST /api/v1/quiz/answer
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string",
///   "answer": { "step": "skinType", "value": "dry" }
/// }
/// ```
async fn record_answer(
    state: web::Data<AppState>,
    req: web::Json<RecordAnswerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            retryable: false,
        });
    }

    let mut session = match load_session(&state, &req.session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(e) = session.record_answer(req.answer.clone()) {
        return quiz_error_response(&e);
    }

    if let Err(response) = store_session(&state, &req.session_id, &session).await {
        return response;
    }

    HttpResponse::Ok().json(progress(&req.session_id, &session))
}

/// Advance the session; from the final step this runs the full pipeline
///
/// POST /api/v1/quiz/next
async fn next_step(
    state: web::Data<AppState>,
    req: web::Json<SessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            retryable: false,
        });
    }

    let mut session = match load_session(&state, &req.session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match session.next() {
        Ok(Advance::Step(step)) => {
            if let Err(response) = store_session(&state, &req.session_id, &session).await {
                return response;
            }
            tracing::debug!("Session {} advanced to step {}", req.session_id, step);
            HttpResponse::Ok().json(progress(&req.session_id, &session))
        }
        Ok(Advance::ReadyToSubmit(answers)) => {
            let catalog = match state.catalog.fetch_catalog().await {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::error!(
                        "Catalog fetch failed for session {}: {}",
                        req.session_id,
                        e
                    );
                    // The session stays in Submitting so the client can retry
                    if session.fail(e.to_string()).is_ok() {
                        if let Err(response) =
                            store_session(&state, &req.session_id, &session).await
                        {
                            return response;
                        }
                    }
                    return HttpResponse::BadGateway().json(ErrorResponse {
                        error: "catalog_unavailable".to_string(),
                        message: e.to_string(),
                        status_code: 502,
                        retryable: true,
                    });
                }
            };

            tracing::debug!(
                "Scoring {} products for session {}",
                catalog.len(),
                req.session_id
            );

            let recommendation =
                state
                    .recommender
                    .recommend(&answers, catalog, state.shortlist_size);

            let result = RecommendationResult {
                answers,
                recommendations: recommendation.shortlist,
                generated_at: chrono::Utc::now(),
            };

            if let Err(e) = session.complete(result.clone()) {
                return quiz_error_response(&e);
            }
            if let Err(response) = store_session(&state, &req.session_id, &session).await {
                return response;
            }

            // Best-effort result cache for later redisplay
            if let Err(e) = state
                .cache
                .set(&CacheKey::results(&req.session_id), &result)
                .await
            {
                tracing::warn!("Failed to cache results for {}: {}", req.session_id, e);
            }

            tracing::info!(
                "Session {} submitted: {} recommendations from {} products",
                req.session_id,
                result.recommendations.len(),
                recommendation.total_scored
            );

            HttpResponse::Ok().json(RecommendationResponse {
                session_id: req.session_id.clone(),
                answers: result.answers.clone(),
                recommendations: result.recommendations.iter().map(ProductCard::from).collect(),
                generated_at: result.generated_at,
            })
        }
        Err(e) => quiz_error_response(&e),
    }
}

/// Step back to the previous quiz step
///
/// POST /api/v1/quiz/previous
async fn previous_step(
    state: web::Data<AppState>,
    req: web::Json<SessionRequest>,
) -> impl Responder {
    let mut session = match load_session(&state, &req.session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(e) = session.previous() {
        return quiz_error_response(&e);
    }

    if let Err(response) = store_session(&state, &req.session_id, &session).await {
        return response;
    }

    HttpResponse::Ok().json(progress(&req.session_id, &session))
}

/// Restart the quiz, clearing answers and results
///
/// POST /api/v1/quiz/retake
async fn retake_quiz(
    state: web::Data<AppState>,
    req: web::Json<SessionRequest>,
) -> impl Responder {
    let mut session = match load_session(&state, &req.session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(e) = session.retake() {
        return quiz_error_response(&e);
    }

    if let Err(response) = store_session(&state, &req.session_id, &session).await {
        return response;
    }

    if let Err(e) = state.cache.delete(&CacheKey::results(&req.session_id)).await {
        tracing::warn!("Failed to drop cached results for {}: {}", req.session_id, e);
    }

    HttpResponse::Ok().json(progress(&req.session_id, &session))
}

/// Redisplay a session's stored recommendations
///
/// GET /api/v1/quiz/results?sessionId={sessionId}
async fn get_results(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let session_id = match query.get("sessionId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "missing_session_id".to_string(),
                message: "sessionId query parameter is required".to_string(),
                status_code: 400,
                retryable: false,
            });
        }
    };

    let result = match state
        .cache
        .get::<RecommendationResult>(&CacheKey::results(session_id))
        .await
    {
        Ok(result) => Some(result),
        Err(_) => match load_session(&state, session_id).await {
            Ok(session) => session.result().cloned(),
            Err(response) => return response,
        },
    };

    match result {
        Some(result) => HttpResponse::Ok().json(RecommendationResponse {
            session_id: session_id.clone(),
            answers: result.answers.clone(),
            recommendations: result.recommendations.iter().map(ProductCard::from).collect(),
            generated_at: result.generated_at,
        }),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "results_not_found".to_string(),
            message: format!("Session {} has no recommendations yet", session_id),
            status_code: 404,
            retryable: false,
        }),
    }
}

/// One-shot recommendations from a completed questionnaire
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "answers": { "ageBracket": "36-45", "gender": "female", ... },
///   "limit": 3
/// }
/// ```
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<FindRecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            retryable: false,
        });
    }

    if req.answers.concerns.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: "at least one concern is required".to_string(),
            status_code: 400,
            retryable: false,
        });
    }

    let catalog = match state.catalog.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Catalog fetch failed: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "catalog_unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
                retryable: true,
            });
        }
    };

    let limit = req.limit as usize;
    let recommendation = state.recommender.recommend(&req.answers, catalog, limit);

    tracing::info!(
        "Returning {} recommendations (from {} products)",
        recommendation.shortlist.len(),
        recommendation.total_scored
    );

    HttpResponse::Ok().json(FindRecommendationsResponse {
        recommendations: recommendation
            .shortlist
            .iter()
            .map(ProductCard::from)
            .collect(),
        total_scored: recommendation.total_scored,
        generated_at: chrono::Utc::now(),
    })
}
