use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ride::{NewRide, Ride, RideStatus, VehicleCategory};

// Request para reservar una grúa
#[derive(Debug, Deserialize, Validate)]
pub struct BookRideRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub contact: String,

    pub vehicle_type: VehicleCategory,

    #[validate(length(min = 5, max = 1000))]
    pub issue_description: String,

    #[validate(length(min = 5, max = 300))]
    pub location_address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub location_lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub location_lng: Option<f64>,
}

impl From<BookRideRequest> for NewRide {
    fn from(request: BookRideRequest) -> Self {
        NewRide {
            name: request.name,
            contact: request.contact,
            vehicle_type: request.vehicle_type,
            issue_description: request.issue_description,
            location_address: request.location_address,
            location_lat: request.location_lat,
            location_lng: request.location_lng,
        }
    }
}

// Request para cambiar el estado de un ride. El enum cerrado rechaza
// cualquier valor fuera de {pending, en-route, completed} al deserializar.
#[derive(Debug, Deserialize)]
pub struct UpdateRideStatusRequest {
    pub status: RideStatus,
}

// Response de ride
#[derive(Debug, Clone, Serialize)]
pub struct RideResponse {
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

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            user_id: ride.user_id,
            name: ride.name,
            contact: ride.contact,
            vehicle_type: ride.vehicle_type,
            issue_description: ride.issue_description,
            location_address: ride.location_address,
            location_lat: ride.location_lat,
            location_lng: ride.location_lng,
            status: ride.status,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}

// Resolución del ride activo: distingue explícitamente "sin ride" de un
// ride encontrado; "todavía cargando" es la request sin responder.
#[derive(Debug, Serialize)]
pub struct ActiveRideResponse {
    pub active: bool,
    pub ride: Option<RideResponse>,
}

// Evento del stream SSE: snapshot completo más el mensaje de la transición
#[derive(Debug, Serialize)]
pub struct RideStreamEvent {
    pub ride: RideResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
