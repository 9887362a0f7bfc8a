use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver_application::{ApplicationStatus, DriverApplication, PaymentStatus};

// Request para postularse como conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverApplicationRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,

    #[validate(length(min = 3, max = 50))]
    pub license_number: String,

    #[validate(range(min = 0, max = 60))]
    pub experience_years: i32,

    #[validate(length(min = 1, max = 60))]
    pub vehicle_make: String,

    #[validate(length(min = 1, max = 60))]
    pub vehicle_model: String,

    #[validate(range(min = 1950, max = 2035))]
    pub vehicle_year: i32,

    #[validate(length(min = 2, max = 20))]
    pub vehicle_plate: String,

    pub previous_experience: Option<String>,
    pub availability: Option<String>,
    pub subscription_duration: Option<String>,
    pub subscription_price: Option<Decimal>,
    pub subscription_start_date: Option<NaiveDate>,
    pub subscription_end_date: Option<NaiveDate>,
}

// Cambio del estado de la solicitud. Independiente del estado de pago.
#[derive(Debug, Deserialize)]
pub struct UpdateDriverStatusRequest {
    pub status: ApplicationStatus,
}

// Cambio del estado de pago. Independiente del estado de la solicitud.
#[derive(Debug, Deserialize)]
pub struct UpdateDriverPaymentRequest {
    pub payment_status: PaymentStatus,
}

// Response de solicitud de conductor
#[derive(Debug, Serialize)]
pub struct DriverApplicationResponse {
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

impl From<DriverApplication> for DriverApplicationResponse {
    fn from(app: DriverApplication) -> Self {
        Self {
            id: app.id,
            full_name: app.full_name,
            email: app.email,
            phone: app.phone,
            license_number: app.license_number,
            experience_years: app.experience_years,
            vehicle_make: app.vehicle_make,
            vehicle_model: app.vehicle_model,
            vehicle_year: app.vehicle_year,
            vehicle_plate: app.vehicle_plate,
            previous_experience: app.previous_experience,
            availability: app.availability,
            subscription_duration: app.subscription_duration,
            subscription_price: app.subscription_price,
            subscription_start_date: app.subscription_start_date,
            subscription_end_date: app.subscription_end_date,
            payment_status: app.payment_status,
            status: app.status,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}
