//! Rutas públicas de solicitudes de conductores
//!
//! El alta es pública; la gestión vive bajo /api/admin.

use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverApplicationRequest, DriverApplicationResponse};
use crate::dto::response::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new().route("/", post(apply))
}

async fn apply(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverApplicationRequest>,
) -> Result<Json<ApiResponse<DriverApplicationResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.apply(request).await?;
    Ok(Json(response))
}
