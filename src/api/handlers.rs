use crate::api::dto::{
    ChatRequestBody, ChatResponseBody, ContactRequest, ContactResponse, ErrorResponse,
};
use crate::app_state::AppState;
use crate::contact::ContactSubmission;
use crate::map::Catalog;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Response {
    let submission = ContactSubmission {
        name: req.name,
        email: req.email,
        interest: req.interest,
        message: req.message,
    };
    match state.contacts.submit(submission).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ContactResponse {
                success: true,
                message: "Contact submitted successfully".to_string(),
                contact_id: outcome.contact_id,
            }),
        )
            .into_response(),
        Err(e) if e.is_client_error() => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                details: None,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("contact submission failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to submit contact form".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// Always answers 200 with a response body once the message validates; any
/// deeper failure already degraded into fallback text inside the assistant.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequestBody>) -> Response {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message is required".to_string(),
                details: None,
            }),
        )
            .into_response();
    }

    let response = state
        .assistant
        .respond(&req.message, req.session_id.as_deref(), &req.history)
        .await;
    (StatusCode::OK, Json(ChatResponseBody { response })).into_response()
}

pub async fn locations(State(state): State<AppState>) -> Json<Catalog> {
    Json((*state.catalog).clone())
}
