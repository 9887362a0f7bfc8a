//! Resolución del ride activo de un usuario
//!
//! Un usuario tiene a lo sumo un ride "actual": el más reciente con estado
//! no terminal. Se usa para autoseleccionar qué ride seguir cuando el
//! caller no trae un identificador.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::ride::Ride;
use crate::repositories::ride_repository::RideStore;
use crate::utils::errors::AppResult;

pub struct ActiveRideResolver {
    store: Arc<dyn RideStore>,
}

impl ActiveRideResolver {
    pub fn new(store: Arc<dyn RideStore>) -> Self {
        Self { store }
    }

    /// `Ok(None)` significa resolución completa sin ride activo; "todavía
    /// resolviendo" es el future sin resolver. El caller no debe confundir
    /// ambos casos al renderizar.
    pub async fn resolve(&self, owner: Uuid) -> AppResult<Option<Ride>> {
        let ride = self.store.find_active_for_owner(owner).await?;

        match &ride {
            Some(r) => log::debug!("Ride activo de {}: {} ({})", owner, r.id, r.status),
            None => log::debug!("Usuario {} sin rides activos", owner),
        }

        Ok(ride)
    }
}
