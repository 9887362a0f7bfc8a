//! Modelo de Ride
//!
//! Este módulo contiene la entidad central del sistema: la solicitud de
//! grúa (ride) y sus enums cerrados de estado y categoría de vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado de un ride. La columna en la base de datos es TEXT sin
/// constraint, así que este enum es la única fuente de verdad sobre los
/// valores válidos: toda conversión desde string pasa por `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RideStatus {
    Pending,
    EnRoute,
    Completed,
}

impl RideStatus {
    /// Única función de validación de frontera: convierte el string crudo
    /// del store en la variante cerrada, fallando ante valores desconocidos.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(RideStatus::Pending),
            "en-route" => Ok(RideStatus::EnRoute),
            "completed" => Ok(RideStatus::Completed),
            other => Err(AppError::Internal(format!(
                "unknown ride status '{}' in store",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Pending => "pending",
            RideStatus::EnRoute => "en-route",
            RideStatus::Completed => "completed",
        }
    }

    /// Un ride completado es terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::Completed)
    }

    /// Estados no terminales: un ride en uno de estos cuenta como "activo".
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categoría de vehículo soportada por el servicio de grúas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Sedan,
    Suv,
    Truck,
    Motorcycle,
    Other,
}

impl VehicleCategory {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "sedan" => Ok(VehicleCategory::Sedan),
            "suv" => Ok(VehicleCategory::Suv),
            "truck" => Ok(VehicleCategory::Truck),
            "motorcycle" => Ok(VehicleCategory::Motorcycle),
            "other" => Ok(VehicleCategory::Other),
            other => Err(AppError::Internal(format!(
                "unknown vehicle category '{}' in store",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "sedan",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Truck => "truck",
            VehicleCategory::Motorcycle => "motorcycle",
            VehicleCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entidad de dominio. `created_at` es inmutable tras la creación y
/// `updated_at` lo asigna el store en cada mutación.
#[derive(Debug, Clone)]
pub struct Ride {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub contact: String,
    pub vehicle_type: VehicleCategory,
    pub issue_description: String,
    pub location_address: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila cruda de la tabla `rides`. Los campos status y vehicle_type llegan
/// como TEXT y se validan en la conversión a `Ride`.
#[derive(Debug, FromRow)]
pub struct RideRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub contact: String,
    pub vehicle_type: String,
    pub issue_description: String,
    pub location_address: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RideRow> for Ride {
    type Error = AppError;

    fn try_from(row: RideRow) -> Result<Self, Self::Error> {
        Ok(Ride {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            contact: row.contact,
            vehicle_type: VehicleCategory::parse(&row.vehicle_type)?,
            issue_description: row.issue_description,
            location_address: row.location_address,
            location_lat: row.location_lat,
            location_lng: row.location_lng,
            status: RideStatus::parse(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Datos de una reserva nueva, ya validados por el DTO de entrada
#[derive(Debug, Clone)]
pub struct NewRide {
    pub name: String,
    pub contact: String,
    pub vehicle_type: VehicleCategory,
    pub issue_description: String,
    pub location_address: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

/// Evento del feed de cambios: el payload es la fila nueva completa
#[derive(Debug, Clone)]
pub struct RideChange {
    pub ride: Ride,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_the_three_statuses() {
        assert_eq!(RideStatus::parse("pending").unwrap(), RideStatus::Pending);
        assert_eq!(RideStatus::parse("en-route").unwrap(), RideStatus::EnRoute);
        assert_eq!(
            RideStatus::parse("completed").unwrap(),
            RideStatus::Completed
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert!(RideStatus::parse("cancelled").is_err());
        assert!(RideStatus::parse("EN-ROUTE").is_err());
        assert!(RideStatus::parse("").is_err());
    }

    #[test]
    fn status_round_trips_through_as_str() {
        for status in [RideStatus::Pending, RideStatus::EnRoute, RideStatus::Completed] {
            assert_eq!(RideStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn only_completed_is_terminal() {
        assert!(!RideStatus::Pending.is_terminal());
        assert!(!RideStatus::EnRoute.is_terminal());
        assert!(RideStatus::Completed.is_terminal());
    }

    #[test]
    fn vehicle_category_round_trips() {
        for cat in [
            VehicleCategory::Sedan,
            VehicleCategory::Suv,
            VehicleCategory::Truck,
            VehicleCategory::Motorcycle,
            VehicleCategory::Other,
        ] {
            assert_eq!(VehicleCategory::parse(cat.as_str()).unwrap(), cat);
        }
        assert!(VehicleCategory::parse("bicycle").is_err());
    }
}
