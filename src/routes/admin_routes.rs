//! Rutas administrativas
//!
//! Todo el router exige un usuario autenticado con rol admin. El rol es
//! una claim resuelta al autenticar; acá no se compara ningún email.

use axum::{
    extract::{Path, State},
    routing::{delete, get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::controllers::driver_controller::DriverController;
use crate::controllers::ride_controller::RideController;
use crate::dto::admin_dto::AdminStatsResponse;
use crate::dto::driver_dto::{
    DriverApplicationResponse, UpdateDriverPaymentRequest, UpdateDriverStatusRequest,
};
use crate::dto::response::ApiResponse;
use crate::dto::ride_dto::{RideResponse, UpdateRideStatusRequest};
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/rides", get(list_rides))
        .route("/rides/:id/status", patch(update_ride_status))
        .route("/rides/:id", delete(delete_ride))
        .route("/drivers", get(list_drivers))
        .route("/drivers/:id", get(get_driver))
        .route("/drivers/:id/status", patch(update_driver_status))
        .route("/drivers/:id/payment", patch(update_driver_payment))
        .route("/drivers/:id", delete(delete_driver))
        // El layer de autenticación corre primero y deja el usuario en las
        // extensions; el de admin valida el rol
        .route_layer(axum::middleware::from_fn(admin_only_middleware))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn stats(State(state): State<AppState>) -> Result<Json<AdminStatsResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn list_rides(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    let controller = RideController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_ride_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRideStatusRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    let controller = RideController::new(&state);
    let response = controller.update_status(id, request.status).await?;
    Ok(Json(response))
}

async fn delete_ride(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RideController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Ride deleted successfully"
    })))
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverApplicationResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverApplicationResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_driver_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverStatusRequest>,
) -> Result<Json<ApiResponse<DriverApplicationResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.update_status(id, request.status).await?;
    Ok(Json(response))
}

async fn update_driver_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverPaymentRequest>,
) -> Result<Json<ApiResponse<DriverApplicationResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller
        .update_payment_status(id, request.payment_status)
        .await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Driver application deleted successfully"
    })))
}
