//! Ciclo de vida de un ride
//!
//! La tabla de transiciones legales se aplica aquí, de forma central,
//! antes de cualquier escritura. El store acepta strings arbitrarios sin
//! constraint, así que la única garantía de transición del sistema entero
//! es la que este módulo impone.
//!
//! Transiciones permitidas:
//!   pending  -> en-route
//!   en-route -> completed
//!   pending  -> completed   (completado directo, p. ej. cancelación)
//!
//! `completed` es terminal. Repetir el mismo estado es un no-op idempotente:
//! no escribe, no toca updated_at y no dispara notificación.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::ride::{Ride, RideStatus};
use crate::repositories::ride_repository::RideStore;
use crate::services::ride_watch::{self, StatusChange, WatchHandle};
use crate::utils::errors::{AppError, AppResult};

/// Par (from, to) de una transición observada u ordenada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RideStatus,
    pub to: RideStatus,
}

/// Tabla de legalidad. Opera solo sobre el enum cerrado, nunca sobre
/// strings crudos.
pub fn is_legal(from: RideStatus, to: RideStatus) -> bool {
    use RideStatus::*;
    matches!(
        (from, to),
        (Pending, EnRoute) | (EnRoute, Completed) | (Pending, Completed)
    )
}

/// Validar una transición, rechazándola antes de tocar el store
pub fn validate_transition(from: RideStatus, to: RideStatus) -> AppResult<Transition> {
    if is_legal(from, to) {
        Ok(Transition { from, to })
    } else {
        Err(AppError::InvalidTransition { from, to })
    }
}

/// Resultado de ordenar un cambio de estado
#[derive(Debug)]
pub enum StatusUpdate {
    /// El estado ya era el pedido; el store no se tocó
    Unchanged(Ride),
    /// Transición legal aplicada y publicada en el feed
    Applied { ride: Ride, transition: Transition },
}

impl StatusUpdate {
    pub fn into_ride(self) -> Ride {
        match self {
            StatusUpdate::Unchanged(ride) => ride,
            StatusUpdate::Applied { ride, .. } => ride,
        }
    }
}

/// Dueño de la noción autoritativa de estado: valida transiciones y expone
/// la interfaz de suscripción sobre el feed del store.
pub struct RideLifecycle {
    store: Arc<dyn RideStore>,
}

impl RideLifecycle {
    pub fn new(store: Arc<dyn RideStore>) -> Self {
        Self { store }
    }

    /// Ordenar una transición de estado.
    ///
    /// Mismo estado: no-op idempotente sin escritura. Transición ilegal:
    /// `InvalidTransition` y el store queda intacto. Solo una transición
    /// validada llega al repositorio.
    pub async fn update_status(&self, id: Uuid, new_status: RideStatus) -> AppResult<StatusUpdate> {
        let current = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ride with id '{}' not found", id)))?;

        if current.status == new_status {
            log::debug!("Ride {} ya está en '{}', no-op", id, new_status);
            return Ok(StatusUpdate::Unchanged(current));
        }

        let transition = validate_transition(current.status, new_status)?;

        let ride = self.store.update_status(id, new_status).await?;

        log::info!(
            "🚕 Ride {} pasó de '{}' a '{}'",
            id,
            transition.from,
            transition.to
        );

        Ok(StatusUpdate::Applied { ride, transition })
    }

    /// Empezar a seguir un ride: lee el snapshot inicial ANTES de
    /// suscribirse (evita la carrera entre carga y alta del feed) y
    /// devuelve el snapshot junto con el handle de cancelación.
    pub async fn track<F>(&self, id: Uuid, on_change: F) -> AppResult<(Ride, WatchHandle)>
    where
        F: Fn(StatusChange) + Send + Sync + 'static,
    {
        let initial = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ride with id '{}' not found", id)))?;

        let handle = ride_watch::subscribe(self.store.clone(), id, initial.status, on_change);

        Ok((initial, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RideStatus::*;

    #[test]
    fn legal_transitions() {
        assert!(is_legal(Pending, EnRoute));
        assert!(is_legal(EnRoute, Completed));
        assert!(is_legal(Pending, Completed));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(!is_legal(Completed, Pending));
        assert!(!is_legal(Completed, EnRoute));
        assert!(!is_legal(Completed, Completed));
    }

    #[test]
    fn no_backwards_transitions() {
        assert!(!is_legal(EnRoute, Pending));
    }

    #[test]
    fn self_transitions_are_not_in_the_table() {
        // El no-op idempotente se resuelve antes de consultar la tabla
        assert!(!is_legal(Pending, Pending));
        assert!(!is_legal(EnRoute, EnRoute));
    }

    #[test]
    fn validate_reports_the_offending_pair() {
        let err = validate_transition(EnRoute, Pending).unwrap_err();
        match err {
            AppError::InvalidTransition { from, to } => {
                assert_eq!(from, EnRoute);
                assert_eq!(to, Pending);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }
}
