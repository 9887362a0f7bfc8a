//! Rutas de rides del portal de clientes
//!
//! Todas requieren autenticación. El stream SSE ata la suscripción al
//! ciclo de vida de la respuesta: si el cliente se desconecta, el handle
//! se suelta y la suscripción se cancela.

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Extension, Json, Router,
};
use futures::{Stream, StreamExt};
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

use crate::controllers::ride_controller::RideController;
use crate::dto::response::ApiResponse;
use crate::dto::ride_dto::{ActiveRideResponse, BookRideRequest, RideResponse, RideStreamEvent};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::services::notifications;
use crate::services::ride_lifecycle::RideLifecycle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ride_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(book_ride))
        .route("/active", get(active_ride))
        .route("/:id", get(get_ride))
        .route("/:id/stream", get(stream_ride))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn book_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<BookRideRequest>,
) -> Result<Json<ApiResponse<RideResponse>>, AppError> {
    let controller = RideController::new(&state);
    let response = controller.book(user.user_id, request).await?;
    Ok(Json(response))
}

async fn get_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    let controller = RideController::new(&state);
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}

async fn active_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ActiveRideResponse>, AppError> {
    let controller = RideController::new(&state);
    let response = controller.active(user.user_id).await?;
    Ok(Json(response))
}

/// Feed de cambios de un ride como Server-Sent Events.
///
/// El snapshot inicial se lee antes del alta de la suscripción, así que
/// no hay carrera entre la carga y el primer evento.
async fn stream_ride(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let lifecycle = RideLifecycle::new(state.ride_store());

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let (initial, handle) = lifecycle
        .track(id, move |change| {
            // El canal preserva el orden de llegada de los eventos
            let _ = tx.send(change);
        })
        .await?;

    if let Err(e) = RideController::ensure_can_view(&initial, &user) {
        handle.cancel();
        return Err(e);
    }

    log::info!("📡 Stream de ride {} abierto por {}", id, user.user_id);

    let snapshot = Event::default().event("snapshot").json_data(RideStreamEvent {
        ride: initial.into(),
        message: None,
    });

    let updates = UnboundedReceiverStream::new(rx).map(move |change| {
        // La suscripción vive exactamente lo que vive este stream
        let _watch = &handle;
        let message = Some(notifications::describe(&change.transition));
        Event::default().event("ride-update").json_data(RideStreamEvent {
            ride: change.ride.into(),
            message,
        })
    });

    let stream = futures::stream::once(async move { snapshot }).chain(updates);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
