use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{
    RegistrationError, RegistrationService, SummitRegistrationRequest, VisitorContext,
};
use crate::workflows::camp::CampRegistrationRequest;
use crate::workflows::registration::ValidationReport;
use crate::workflows::hubspot::{
    visitor_token_from_cookies, EventDirectory, EventLookup, FormKind, FormsGateway,
    SubmissionError,
};
use crate::workflows::summit::{AnswerEdit, RegistrationAnswers};

/// Body of the quote endpoint: a starting record, edits to replay in order,
/// and whether to report errors as if the form had been submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    pub answers: RegistrationAnswers,
    pub edits: Vec<AnswerEdit>,
    pub validate: bool,
}

/// Router builder exposing registration, summit lookup, and quote endpoints.
pub fn registration_router<F, D>(service: Arc<RegistrationService<F, D>>) -> Router
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    Router::new()
        .route("/api/register", post(summit_handler::<F, D>))
        .route("/api/register/camp-essence", post(camp_handler::<F, D>))
        .route("/api/summits", get(upcoming_handler::<F, D>))
        .route("/api/summits/:summit_id", get(lookup_handler::<F, D>))
        .route("/api/v1/summit/quote", post(quote_handler::<F, D>))
        .with_state(service)
}

pub(crate) async fn summit_handler<F, D>(
    State(service): State<Arc<RegistrationService<F, D>>>,
    headers: HeaderMap,
    body: Result<axum::Json<SummitRegistrationRequest>, JsonRejection>,
) -> Response
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return malformed_body(FormKind::Summit, rejection),
    };

    match service.submit_summit(request, &visitor_context(&headers)).await {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => submission_failure(FormKind::Summit, error),
    }
}

pub(crate) async fn camp_handler<F, D>(
    State(service): State<Arc<RegistrationService<F, D>>>,
    headers: HeaderMap,
    body: Result<axum::Json<CampRegistrationRequest>, JsonRejection>,
) -> Response
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return malformed_body(FormKind::CampEssence, rejection),
    };

    match service.submit_camp(request, &visitor_context(&headers)).await {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => submission_failure(FormKind::CampEssence, error),
    }
}

pub(crate) async fn upcoming_handler<F, D>(
    State(service): State<Arc<RegistrationService<F, D>>>,
) -> Response
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    match service.upcoming_summits().await {
        Ok(summits) => (StatusCode::OK, axum::Json(json!({ "summits": summits }))).into_response(),
        Err(error) => directory_failure(error, "Failed to fetch summits"),
    }
}

pub(crate) async fn lookup_handler<F, D>(
    State(service): State<Arc<RegistrationService<F, D>>>,
    Path(summit_id): Path<String>,
) -> Response
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    match service.lookup_summit(&summit_id).await {
        Ok(EventLookup::Missing) => {
            let payload = json!({
                "error": "Summit not found",
                "status": EventLookup::Missing.status(),
                "notice": EventLookup::Missing.notice(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Ok(lookup) => {
            let payload = json!({
                "summit": lookup.summit(),
                "status": lookup.status(),
                "notice": lookup.notice(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => directory_failure(error, "Failed to fetch summit"),
    }
}

pub(crate) async fn quote_handler<F, D>(
    State(service): State<Arc<RegistrationService<F, D>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    let snapshot = service.quote(request.answers, request.edits, request.validate);
    (StatusCode::OK, axum::Json(snapshot)).into_response()
}

fn visitor_context(headers: &HeaderMap) -> VisitorContext {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    VisitorContext {
        visitor_token: header_text(header::COOKIE)
            .as_deref()
            .and_then(visitor_token_from_cookies),
        page_uri: header_text(header::REFERER),
    }
}

fn form_not_found_message(form: FormKind) -> String {
    let product = match form {
        FormKind::Summit => "Summit",
        FormKind::CampEssence => "Camp Essence",
    };
    format!(
        "{product} form configuration error: HubSpot form was not found. Please verify {}.",
        form.guid_variable()
    )
}

/// Bodies that do not deserialize share the validation failure shape, keyed
/// under `body`.
fn malformed_body(form: FormKind, rejection: JsonRejection) -> Response {
    let mut report = ValidationReport::new();
    report.push("body", rejection.body_text());
    tracing::debug!(form = form.label(), error = %rejection.body_text(), "registration body rejected");

    submission_failure(form, RegistrationError::Validation(report))
}

fn submission_failure(form: FormKind, error: RegistrationError) -> Response {
    let (status, payload) = match &error {
        RegistrationError::Validation(report) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Validation failed", "details": report }),
        ),
        other if other.is_configuration() => {
            tracing::error!(form = form.label(), error = %other, "registration service misconfigured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server configuration error" }),
            )
        }
        RegistrationError::Submission(SubmissionError::FormNotFound { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": form_not_found_message(form) }),
        ),
        other => {
            tracing::error!(form = form.label(), error = %other, "registration submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to submit registration" }),
            )
        }
    };

    (status, axum::Json(payload)).into_response()
}

fn directory_failure(error: RegistrationError, message: &str) -> Response {
    let message = if error.is_configuration() {
        tracing::error!(%error, "summit directory misconfigured");
        "Server configuration error"
    } else {
        tracing::error!(%error, "summit directory request failed");
        message
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": message })),
    )
        .into_response()
}
