//! REST API endpoints for form submissions and liveness.

use crate::ApiApplication;
use aide::axum::{ApiRouter, routing::post};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, State, rejection::BytesRejection},
};
use intake_core::{
    handle_submission, health_check,
    models::{Ack, HealthStatus},
};

/// Creates a router with the submission endpoint and its liveness twin.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/",
        post(submit::<T>).get(health::<T>),
        |route| route.tag("submission"),
    )
}

/// The raw request body of a submission.
///
/// The body is decoded by the handler rather than by an extractor, so a body
/// that is not JSON still receives a JSON acknowledgement.
pub(crate) struct SubmissionBody(Bytes);

impl<S: Send + Sync> FromRequest<S> for SubmissionBody {
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state).await.map(Self)
    }
}

impl aide::OperationInput for SubmissionBody {}

/// Submit a consultation request.
///
/// The body is a JSON object with optional string fields `name`, `grade`,
/// `phone`, `datetime`, and `message`. Missing fields are stored as `-`.
///
/// # Returns
///
/// Always `200 OK`:
/// - `{success: true, message, row}` with the 1-based sheet row
/// - `{success: false, error}` if the body is not JSON, the sheet could not
///   be written, or the notification failed (then `row` is also present)
pub(crate) async fn submit<T: ApiApplication>(
    State(app): State<T>,
    SubmissionBody(body): SubmissionBody,
) -> Json<Ack> {
    Json(handle_submission(&app, &body).await)
}

/// Liveness check.
///
/// Never touches the sheet store or the mail relay.
pub(crate) async fn health<T: ApiApplication>(State(app): State<T>) -> Json<HealthStatus> {
    Json(health_check(&app))
}
