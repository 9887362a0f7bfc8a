//! Store de rides en memoria para tests
//!
//! Implementa el mismo trait que el repositorio de producción, con un par
//! de helpers para simular escrituras de otros clientes y payloads de
//! eventos viciados.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use towing_dispatch::models::ride::{NewRide, Ride, RideChange, RideStatus, VehicleCategory};
use towing_dispatch::repositories::ride_repository::RideStore;
use towing_dispatch::utils::errors::{AppError, AppResult};

pub struct MemoryRideStore {
    rides: Mutex<HashMap<Uuid, Ride>>,
    tx: broadcast::Sender<RideChange>,
}

impl MemoryRideStore {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            rides: Mutex::new(HashMap::new()),
            tx,
        }
    }

    /// Publicar un evento sin tocar la tabla: simula un payload parcial o
    /// desactualizado llegando por el feed.
    pub fn publish_raw(&self, ride: Ride) {
        let _ = self.tx.send(RideChange { ride });
    }

    /// Escribir el estado sin publicar evento: simula a otro cliente
    /// mutando la fila por fuera de este proceso.
    pub fn set_status_silently(&self, id: Uuid, status: RideStatus) {
        let mut rides = self.rides.lock().unwrap();
        if let Some(ride) = rides.get_mut(&id) {
            ride.status = status;
            ride.updated_at = ride.updated_at + Duration::milliseconds(1);
        }
    }
}

/// Reserva de ejemplo
pub fn booking(name: &str) -> NewRide {
    NewRide {
        name: name.to_string(),
        contact: "+1 555 123 4567".to_string(),
        vehicle_type: VehicleCategory::Sedan,
        issue_description: "Flat tire on the highway".to_string(),
        location_address: "123 Main St, Springfield".to_string(),
        location_lat: Some(39.78),
        location_lng: Some(-89.65),
    }
}

#[async_trait]
impl RideStore for MemoryRideStore {
    async fn create(&self, owner: Uuid, booking: NewRide) -> AppResult<Ride> {
        let now = Utc::now();
        let ride = Ride {
            id: Uuid::new_v4(),
            user_id: owner,
            name: booking.name,
            contact: booking.contact,
            vehicle_type: booking.vehicle_type,
            issue_description: booking.issue_description,
            location_address: booking.location_address,
            location_lat: booking.location_lat,
            location_lng: booking.location_lng,
            status: RideStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.rides.lock().unwrap().insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        Ok(self.rides.lock().unwrap().get(&id).cloned())
    }

    async fn find_active_for_owner(&self, owner: Uuid) -> AppResult<Option<Ride>> {
        let rides = self.rides.lock().unwrap();
        let mut active: Vec<&Ride> = rides
            .values()
            .filter(|r| r.user_id == owner && r.status.is_active())
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active.first().map(|r| (*r).clone()))
    }

    async fn update_status(&self, id: Uuid, new_status: RideStatus) -> AppResult<Ride> {
        let ride = {
            let mut rides = self.rides.lock().unwrap();
            let ride = rides
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound(format!("Ride with id '{}' not found", id)))?;

            // updated_at crece estrictamente en cada mutación
            let now = Utc::now();
            ride.updated_at = if now > ride.updated_at {
                now
            } else {
                ride.updated_at + Duration::milliseconds(1)
            };
            ride.status = new_status;
            ride.clone()
        };

        let _ = self.tx.send(RideChange { ride: ride.clone() });
        Ok(ride)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.rides
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Ride with id '{}' not found", id)))
    }

    async fn list_all(&self) -> AppResult<Vec<Ride>> {
        let mut rides: Vec<Ride> = self.rides.lock().unwrap().values().cloned().collect();
        rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rides)
    }

    fn changes(&self) -> broadcast::Receiver<RideChange> {
        self.tx.subscribe()
    }
}
