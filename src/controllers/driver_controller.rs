//! Controller de solicitudes de conductores

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverApplicationRequest, DriverApplicationResponse};
use crate::dto::response::ApiResponse;
use crate::models::driver_application::{ApplicationStatus, PaymentStatus};
use crate::repositories::driver_application_repository::DriverApplicationRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct DriverController {
    repository: DriverApplicationRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverApplicationRepository::new(pool),
        }
    }

    pub async fn apply(
        &self,
        request: CreateDriverApplicationRequest,
    ) -> AppResult<ApiResponse<DriverApplicationResponse>> {
        request.validate()?;

        let application = self.repository.create(request).await?;

        log::info!("🚛 Solicitud de conductor {} recibida", application.id);

        Ok(ApiResponse::success_with_message(
            application.into(),
            "Your driver application has been submitted successfully.".to_string(),
        ))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<DriverApplicationResponse> {
        let application = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver application not found".to_string()))?;

        Ok(application.into())
    }

    pub async fn list(&self) -> AppResult<Vec<DriverApplicationResponse>> {
        let applications = self.repository.list_all().await?;
        Ok(applications
            .into_iter()
            .map(DriverApplicationResponse::from)
            .collect())
    }

    /// Los dos estados son ortogonales: cada endpoint toca uno solo
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> AppResult<ApiResponse<DriverApplicationResponse>> {
        let application = self.repository.update_status(id, status).await?;

        Ok(ApiResponse::success_with_message(
            application.into(),
            format!("Application status updated to {}", status.as_str()),
        ))
    }

    pub async fn update_payment_status(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
    ) -> AppResult<ApiResponse<DriverApplicationResponse>> {
        let application = self
            .repository
            .update_payment_status(id, payment_status)
            .await?;

        Ok(ApiResponse::success_with_message(
            application.into(),
            format!("Payment status updated to {}", payment_status.as_str()),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("🗑️ Solicitud de conductor {} eliminada", id);
        Ok(())
    }
}
