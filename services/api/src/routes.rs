use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use claim_radar::error::AppError;
use claim_radar::intake::{AnswerSet, CompletedIntake, DraftAnswers, IntakeFlow, IntakeGuard};
use claim_radar::report::{
    render, report_file_name, summary_view, AssessmentSummaryView, PageLayout, ReportDocument,
};
use claim_radar::scoring::ViabilityResult;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    #[serde(default)]
    pub(crate) answers: DraftAnswers,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) evaluated_on: NaiveDate,
    pub(crate) answers: AnswerSet,
    pub(crate) result: ViabilityResult,
    pub(crate) summary: AssessmentSummaryView,
    pub(crate) report_file_name: String,
}

pub(crate) fn assessment_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessments",
            axum::routing::post(assessment_endpoint),
        )
        .route(
            "/api/v1/assessments/report",
            axum::routing::post(report_endpoint),
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

fn complete_intake(request: AssessmentRequest) -> Result<CompletedIntake, AppError> {
    let today = request
        .today
        .unwrap_or_else(|| Local::now().date_naive());
    let mut flow = IntakeFlow::from_draft(request.answers, IntakeGuard::default());
    Ok(flow.finalize(today)?)
}

pub(crate) async fn assessment_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let CompletedIntake {
        answers,
        result,
        evaluated_on,
    } = complete_intake(payload)?;

    info!(score = result.score, tier = ?result.tier, "assessment completed");

    Ok(Json(AssessmentResponse {
        evaluated_on,
        summary: summary_view(&state.firm, &answers, &result),
        report_file_name: report_file_name(&answers.contact().full_name),
        answers,
        result,
    }))
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let completed = complete_intake(payload)?;
    let document = ReportDocument::build(
        &state.firm,
        &completed.answers,
        &completed.result,
        completed.evaluated_on,
    );
    let report = render(&document, PageLayout::default());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_file_name(&completed.answers.contact().full_name)
    );

    info!(pages = report.page_count(), "report rendered");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.to_text(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use claim_radar::config::FirmConfig;
    use claim_radar::scoring::Tier;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            firm: Arc::new(FirmConfig::default()),
        }
    }

    fn request_body() -> serde_json::Value {
        json!({
            "today": "2026-10-19",
            "answers": {
                "case_type": "invoice",
                "claim_amount": 5000,
                "invoice_date": "2026-07-19",
                "last_contact_date": "2026-09-30",
                "evidence": ["invoice", "contract", "delivery_note", "written_acknowledgment"],
                "debtor_type": "company",
                "debtor_identified": "full",
                "debtor_location": "same_jurisdiction",
                "debtor_solvency_hint": "solvent",
                "prior_actions": "formal_notice",
                "priority": "fastest",
                "full_name": "Ana Pereira",
                "email": "ana@example.com",
                "phone": "600123456",
                "consent_privacy": true,
                "consent_contact": true
            }
        })
    }

    fn parse_request(value: serde_json::Value) -> AssessmentRequest {
        serde_json::from_value(value).expect("request deserializes")
    }

    #[tokio::test]
    async fn assessment_endpoint_scores_valid_answers() {
        let Json(body) =
            assessment_endpoint(Extension(state(true)), Json(parse_request(request_body())))
                .await
                .expect("assessment succeeds");

        assert_eq!(body.result.score, 93);
        assert_eq!(body.result.tier, Tier::High);
        assert_eq!(body.summary.recoverable_range, "€3,500 - €4,500");
        assert_eq!(body.summary.presentation.badge, "High priority");
        assert_eq!(body.report_file_name, "viability-report-Ana-Pereira.txt");

        assert_eq!(body.summary.checklist.len(), 10);
        assert_eq!(body.summary.next_steps.contact_email, "hola@radarlegal.com");
        assert_eq!(
            body.summary.next_steps.booking_url,
            "https://calendly.com/radar-legal/revision"
        );
        assert!(body
            .summary
            .next_steps
            .contact_link
            .contains("Ana%20Pereira"));
    }

    #[tokio::test]
    async fn assessment_endpoint_rejects_incomplete_answers() {
        let mut value = request_body();
        value["answers"]["consent_contact"] = json!(false);
        value["answers"]["claim_amount"] = json!(0);

        match assessment_endpoint(Extension(state(true)), Json(parse_request(value))).await {
            Err(AppError::Intake(err)) => {
                let message = err.to_string();
                assert!(message.contains("greater than zero"), "{message}");
                assert!(message.contains("contacted"), "{message}");
            }
            other => panic!("expected intake error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn rejected_assessment_returns_violations_and_stage() {
        let mut value = request_body();
        value["answers"]["email"] = json!("ana-at-example");

        let app = assessment_routes().layer(Extension(state(true)));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(value.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(body["stage"], "contact");
        assert_eq!(body["violations"][0]["kind"], "invalid_email");
    }

    #[tokio::test]
    async fn report_endpoint_returns_paginated_text() {
        let response = report_endpoint(
            Extension(state(true)),
            Json(parse_request(request_body())),
        )
        .await
        .expect("report renders")
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .expect("disposition header");
        assert!(disposition.contains("viability-report-Ana-Pereira.txt"));

        let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8 report");
        assert!(text.starts_with("RADAR LEGAL"));
        assert!(text.contains("ESTIMATED VIABILITY: HIGH"));
        assert!(text.contains("Page 1 of"));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
