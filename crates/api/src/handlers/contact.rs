//! Handler for the contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_db::models::contact::CreateContactMessage;
use folio_db::models::validate_input;

use crate::error::AppResult;
use crate::extract::{AppJson, ClientOrigin};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/v1/contact
pub async fn submit(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    AppJson(input): AppJson<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_input(&input)?;
    let message = state.store.create_contact(&input, &origin).await?;
    tracing::info!(
        contact_id = message.id,
        backend = state.store.backend(),
        "Contact message received",
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Contact form submitted successfully",
            id: message.id,
        }),
    ))
}
