//! Modelo de Driver Application
//!
//! Solicitudes de conductores con dos enums independientes: estado de la
//! solicitud y estado del pago. Son ortogonales; cada uno se valida por
//! separado y no hay invariante cruzada entre ambos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del flujo de aprobación de una solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Active,
    Suspended,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(ApplicationStatus::Pending),
            "under_review" => Ok(ApplicationStatus::UnderReview),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "active" => Ok(ApplicationStatus::Active),
            "suspended" => Ok(ApplicationStatus::Suspended),
            other => Err(AppError::Internal(format!(
                "unknown application status '{}' in store",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Active => "active",
            ApplicationStatus::Suspended => "suspended",
        }
    }
}

/// Estado del pago de la suscripción del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "overdue" => Ok(PaymentStatus::Overdue),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(AppError::Internal(format!(
                "unknown payment status '{}' in store",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

/// Entidad de dominio de una solicitud de conductor
#[derive(Debug, Clone)]
pub struct DriverApplication {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub experience_years: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_plate: String,
    pub previous_experience: Option<String>,
    pub availability: Option<String>,
    pub subscription_duration: Option<String>,
    pub subscription_price: Option<Decimal>,
    pub subscription_start_date: Option<NaiveDate>,
    pub subscription_end_date: Option<NaiveDate>,
    pub payment_status: PaymentStatus,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila cruda de `driver_applications`; los dos estados llegan como TEXT
#[derive(Debug, FromRow)]
pub struct DriverApplicationRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub experience_years: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_plate: String,
    pub previous_experience: Option<String>,
    pub availability: Option<String>,
    pub subscription_duration: Option<String>,
    pub subscription_price: Option<Decimal>,
    pub subscription_start_date: Option<NaiveDate>,
    pub subscription_end_date: Option<NaiveDate>,
    pub payment_status: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DriverApplicationRow> for DriverApplication {
    type Error = AppError;

    fn try_from(row: DriverApplicationRow) -> Result<Self, Self::Error> {
        // Cada enum se valida de forma independiente
        let status = ApplicationStatus::parse(&row.status)?;
        let payment_status = PaymentStatus::parse(&row.payment_status)?;

        Ok(DriverApplication {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            license_number: row.license_number,
            experience_years: row.experience_years,
            vehicle_make: row.vehicle_make,
            vehicle_model: row.vehicle_model,
            vehicle_year: row.vehicle_year,
            vehicle_plate: row.vehicle_plate,
            previous_experience: row.previous_experience,
            availability: row.availability,
            subscription_duration: row.subscription_duration,
            subscription_price: row.subscription_price,
            subscription_start_date: row.subscription_start_date,
            subscription_end_date: row.subscription_end_date,
            payment_status,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_status_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Active,
            ApplicationStatus::Suspended,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(ApplicationStatus::parse("archived").is_err());
    }

    #[test]
    fn payment_status_round_trips() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Overdue,
            PaymentStatus::Cancelled,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(PaymentStatus::parse("refunded").is_err());
    }
}
