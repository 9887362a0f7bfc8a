//! Controller de rides

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::response::ApiResponse;
use crate::dto::ride_dto::{ActiveRideResponse, BookRideRequest, RideResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ride::{Ride, RideStatus};
use crate::repositories::ride_repository::RideStore;
use crate::services::active_ride::ActiveRideResolver;
use crate::services::notifications;
use crate::services::ride_lifecycle::{RideLifecycle, StatusUpdate};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct RideController {
    store: Arc<dyn RideStore>,
}

impl RideController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.ride_store(),
        }
    }

    /// Un ride es visible solo para su dueño o para un administrador
    pub fn ensure_can_view(ride: &Ride, auth: &AuthenticatedUser) -> AppResult<()> {
        if ride.user_id == auth.user_id || auth.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have access to this ride".to_string(),
            ))
        }
    }

    pub async fn book(
        &self,
        owner: Uuid,
        request: BookRideRequest,
    ) -> AppResult<ApiResponse<RideResponse>> {
        request.validate()?;

        let ride = self.store.create(owner, request.into()).await?;

        log::info!("🚗 Ride {} creado por {}", ride.id, owner);

        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Your ride request has been submitted successfully. You can now track your ride status."
                .to_string(),
        ))
    }

    pub async fn get(&self, id: Uuid, auth: &AuthenticatedUser) -> AppResult<RideResponse> {
        let ride = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

        Self::ensure_can_view(&ride, auth)?;

        Ok(ride.into())
    }

    pub async fn active(&self, owner: Uuid) -> AppResult<ActiveRideResponse> {
        let resolver = ActiveRideResolver::new(self.store.clone());
        let ride = resolver.resolve(owner).await?;

        Ok(ActiveRideResponse {
            active: ride.is_some(),
            ride: ride.map(RideResponse::from),
        })
    }

    /// Cambio de estado administrativo, validado por el ciclo de vida
    /// antes de cualquier escritura
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: RideStatus,
    ) -> AppResult<ApiResponse<RideResponse>> {
        let lifecycle = RideLifecycle::new(self.store.clone());

        match lifecycle.update_status(id, new_status).await? {
            StatusUpdate::Unchanged(ride) => Ok(ApiResponse::success(ride.into())),
            StatusUpdate::Applied { ride, transition } => Ok(ApiResponse::success_with_message(
                ride.into(),
                notifications::describe(&transition),
            )),
        }
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.delete(id).await?;
        log::info!("🗑️ Ride {} eliminado", id);
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<RideResponse>> {
        let rides = self.store.list_all().await?;
        Ok(rides.into_iter().map(RideResponse::from).collect())
    }
}
