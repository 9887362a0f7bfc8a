//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El canal broadcast es el feed de cambios
//! de rides: el repositorio publica y cada suscripción filtra por id.

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::config::EnvironmentConfig;
use crate::models::ride::RideChange;
use crate::repositories::ride_repository::{RideRepository, RideStore};

/// Capacidad del canal de eventos; un suscriptor que se atrase más que
/// esto se reconcilia releyendo la fila.
const RIDE_FEED_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
    pub ride_changes: broadcast::Sender<RideChange>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let (ride_changes, _) = broadcast::channel(RIDE_FEED_CAPACITY);
        Self {
            pool,
            config,
            http_client: Client::new(),
            ride_changes,
        }
    }

    /// Store de rides inyectable: los handlers lo reciben como dependencia
    /// explícita y los tests lo sustituyen por un fake en memoria.
    pub fn ride_store(&self) -> Arc<dyn RideStore> {
        Arc::new(RideRepository::new(
            self.pool.clone(),
            self.ride_changes.clone(),
        ))
    }
}
