use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use decision_trainer::error::AppError;
use decision_trainer::scoresheet::ScoreSheetImporter;
use decision_trainer::training::{
    session_router, AggregatedReport, Curriculum, ScoreAggregator, SessionRepository,
    TrainingSessionService,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreSheetReportRequest {
    pub(crate) scores_csv: String,
}

pub(crate) fn with_session_routes<R>(service: Arc<TrainingSessionService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    session_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/reports/scoresheet",
            axum::routing::post(scoresheet_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Grades an uploaded score sheet against the standard report definition.
pub(crate) async fn scoresheet_report_endpoint(
    Json(payload): Json<ScoreSheetReportRequest>,
) -> Result<Json<AggregatedReport>, AppError> {
    let aggregator = ScoreAggregator::new(Curriculum::standard().report().clone())?;
    let reader = Cursor::new(payload.scores_csv.into_bytes());
    let report = ScoreSheetImporter::report_from_reader(reader, &aggregator)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySessionRepository;
    use axum::body::Body;
    use axum::http::Request;
    use decision_trainer::training::LevelRating;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(TrainingSessionService::new(
            Arc::new(InMemorySessionRepository::default()),
            Curriculum::standard(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_session_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn session_routes_are_mounted_alongside_probes() {
        let response = app(true)
            .oneshot(
                Request::post("/api/v1/sessions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn scoresheet_report_endpoint_grades_upload() {
        let request = ScoreSheetReportRequest {
            scores_csv: "Key,Score\npriority_sort_1,40\npriority_sort_2,40\nadvisor_round_1,60\nadvisor_round_2,60\nadvisor_round_3,100\n".to_string(),
        };

        let Json(report) = scoresheet_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(report.total_score, 300);
        assert_eq!(report.level_rating, LevelRating::NoviceStrategist);
    }

    #[tokio::test]
    async fn malformed_scoresheet_is_a_bad_request() {
        let request = ScoreSheetReportRequest {
            scores_csv: "Key,Score\nadvisor_round_1,sixty\n".to_string(),
        };

        let error = scoresheet_report_endpoint(Json(request))
            .await
            .expect_err("csv rejected");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn readiness_flag_is_shared() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        flag.store(true, Ordering::Release);
        assert!(state.readiness.load(Ordering::Acquire));
    }
}
