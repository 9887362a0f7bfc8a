//! Repositorio de solicitudes de conductores

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::driver_dto::CreateDriverApplicationRequest;
use crate::models::driver_application::{
    ApplicationStatus, DriverApplication, DriverApplicationRow, PaymentStatus,
};
use crate::utils::errors::{AppError, AppResult};

pub struct DriverApplicationRepository {
    pool: PgPool,
}

impl DriverApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: CreateDriverApplicationRequest,
    ) -> AppResult<DriverApplication> {
        let row = sqlx::query_as::<_, DriverApplicationRow>(
            r#"
            INSERT INTO driver_applications
                (id, full_name, email, phone, license_number, experience_years,
                 vehicle_make, vehicle_model, vehicle_year, vehicle_plate,
                 previous_experience, availability, subscription_duration,
                 subscription_price, subscription_start_date, subscription_end_date,
                 payment_status, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    'pending', 'pending', now(), now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.license_number)
        .bind(request.experience_years)
        .bind(request.vehicle_make)
        .bind(request.vehicle_model)
        .bind(request.vehicle_year)
        .bind(request.vehicle_plate)
        .bind(request.previous_experience)
        .bind(request.availability)
        .bind(request.subscription_duration)
        .bind(request.subscription_price)
        .bind(request.subscription_start_date)
        .bind(request.subscription_end_date)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DriverApplication>> {
        let row = sqlx::query_as::<_, DriverApplicationRow>(
            "SELECT * FROM driver_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DriverApplication::try_from).transpose()
    }

    pub async fn list_all(&self) -> AppResult<Vec<DriverApplication>> {
        let rows = sqlx::query_as::<_, DriverApplicationRow>(
            "SELECT * FROM driver_applications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DriverApplication::try_from).collect()
    }

    /// Actualizar el estado de la solicitud. El estado de pago no se toca:
    /// ambos enums son ortogonales.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> AppResult<DriverApplication> {
        let row = sqlx::query_as::<_, DriverApplicationRow>(
            r#"
            UPDATE driver_applications
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Driver application with id '{}' not found", id))
        })?;

        row.try_into()
    }

    /// Actualizar solo el estado de pago
    pub async fn update_payment_status(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
    ) -> AppResult<DriverApplication> {
        let row = sqlx::query_as::<_, DriverApplicationRow>(
            r#"
            UPDATE driver_applications
            SET payment_status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Driver application with id '{}' not found", id))
        })?;

        row.try_into()
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM driver_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Driver application with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
