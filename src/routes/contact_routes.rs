//! Rutas del formulario de contacto

use axum::{extract::State, routing::post, Json, Router};

use crate::dto::contact_dto::SendFormRequest;
use crate::dto::response::ApiResponse;
use crate::services::email_service::EmailService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/send", post(send_form))
}

async fn send_form(
    State(state): State<AppState>,
    Json(request): Json<SendFormRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let service = EmailService::new(state.http_client.clone(), &state.config);
    let data = service.forward_form(request.form_data).await?;
    Ok(Json(ApiResponse::success_with_message(
        data,
        "Email sent successfully".to_string(),
    )))
}
