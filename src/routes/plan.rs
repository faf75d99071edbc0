use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Plan, PlanError, Planner};
use crate::models::{ErrorResponse, HealthResponse, PlanRequest, PlanResponse};
use crate::services::export::{schedule_rows, to_delimited};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Planner,
}

/// Configure all planning routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/plan", web::post().to(create_plan))
        .route("/plan/export", web::post().to(export_plan));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Plan endpoint
///
/// POST /api/v1/plan
///
/// Request body:
/// ```json
/// {
///   "participants": [ ... ],
///   "partyLocation": { "latitude": 50.58, "longitude": 8.67 },
///   "seed": 42
/// }
/// ```
async fn create_plan(state: web::Data<AppState>, req: web::Json<PlanRequest>) -> impl Responder {
    let plan = match run_planner(&state, &req) {
        Ok(plan) => plan,
        Err(response) => return response,
    };

    let successor_pairs = plan.groups.successor_pairs().map(|p| p.pair_number).collect();

    HttpResponse::Ok().json(PlanResponse {
        plan_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now(),
        pairs: plan.groups.pairs,
        groups: plan.groups.groups,
        successor_participants: plan.pairing.successors,
        successor_pairs,
        pair_indicators: plan.pair_indicators,
        group_indicators: plan.group_indicators,
    })
}

/// Export endpoint
///
/// POST /api/v1/plan/export
///
/// Same body as `/plan`; responds with the `;`-delimited schedule.
async fn export_plan(state: web::Data<AppState>, req: web::Json<PlanRequest>) -> impl Responder {
    let plan = match run_planner(&state, &req) {
        Ok(plan) => plan,
        Err(response) => return response,
    };

    let rows = schedule_rows(&plan.groups);
    tracing::info!("Exporting {} schedule rows", rows.len());

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(to_delimited(&rows))
}

fn run_planner(state: &AppState, req: &PlanRequest) -> Result<Plan, HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for plan request: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    state
        .planner
        .plan(&req.participants, &req.party_location, req.seed)
        .map_err(error_response)
}

fn error_response(err: PlanError) -> HttpResponse {
    if err.is_client_error() {
        tracing::info!("Rejected plan request: {}", err);
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid participant".to_string(),
            message: err.to_string(),
            status_code: 400,
        })
    } else {
        tracing::error!("Planning failed: {}", err);
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Planning failed".to_string(),
            message: err.to_string(),
            status_code: 500,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn app_state() -> AppState {
        AppState {
            planner: Planner::default(),
        }
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn test_plan_rejects_short_participant_list() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "participants": [],
            "partyLocation": { "latitude": 50.58, "longitude": 8.67 }
        });
        let req = test::TestRequest::post().uri("/plan").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_plan_returns_pairs() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "participants": [
                {
                    "id": "a", "name": "Ada", "age": 28, "gender": "female",
                    "foodPreference": "meat", "hasKitchen": "no"
                },
                {
                    "id": "b", "name": "Ben", "age": 31, "gender": "male",
                    "foodPreference": "none", "hasKitchen": "yes",
                    "kitchen": { "latitude": 50.58, "longitude": 8.68, "story": 2 }
                }
            ],
            "partyLocation": { "latitude": 50.58, "longitude": 8.67 },
            "seed": 5
        });
        let req = test::TestRequest::post().uri("/plan").set_json(body).to_request();
        let resp: PlanResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.pairs.len(), 1);
        assert_eq!(resp.successor_pairs, vec![1]);
        assert!(resp.groups.is_empty());
    }
}
