//! Controller del dashboard administrativo
//!
//! Los contadores se calculan sobre los listados completos, igual que el
//! dashboard los consume.

use crate::dto::admin_dto::AdminStatsResponse;
use crate::models::driver_application::ApplicationStatus;
use crate::models::ride::RideStatus;
use crate::repositories::driver_application_repository::DriverApplicationRepository;
use crate::repositories::ride_repository::RideStore;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AdminController {
    state: AppState,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn stats(&self) -> AppResult<AdminStatsResponse> {
        let rides = self.state.ride_store().list_all().await?;
        let drivers = DriverApplicationRepository::new(self.state.pool.clone())
            .list_all()
            .await?;
        let total_users = UserRepository::new(self.state.pool.clone()).count().await?;

        let pending_rides = rides
            .iter()
            .filter(|r| r.status == RideStatus::Pending)
            .count() as i64;
        let completed_rides = rides
            .iter()
            .filter(|r| r.status == RideStatus::Completed)
            .count() as i64;
        let pending_drivers = drivers
            .iter()
            .filter(|d| d.status == ApplicationStatus::Pending)
            .count() as i64;

        Ok(AdminStatsResponse {
            total_users,
            total_rides: rides.len() as i64,
            pending_rides,
            completed_rides,
            total_drivers: drivers.len() as i64,
            pending_drivers,
        })
    }
}
