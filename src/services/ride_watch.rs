//! Suscripción al feed de cambios de un ride
//!
//! Observer explícito sobre el canal broadcast del store, filtrado a un
//! solo ride id. Los eventos se aplican en orden de llegada (orden de
//! commit del store); nunca se reordena por timestamps locales. Un evento
//! cuyo estado es inalcanzable desde el último conocido fuerza una
//! relectura completa de la fila para reconciliar estados intermedios
//! perdidos.
//!
//! Contrato de cancelación: `WatchHandle::cancel` es síncrono. Al retornar,
//! ningún `on_change` está en vuelo ni volverá a invocarse. Soltar el
//! handle cancela (disciplina cancel-on-unmount).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::models::ride::{Ride, RideStatus};
use crate::repositories::ride_repository::RideStore;
use crate::services::ride_lifecycle::{is_legal, Transition};

/// Snapshot entregado a los suscriptores en cada cambio observado
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub ride: Ride,
    pub transition: Transition,
}

/// Handle de una suscripción viva. Una suscripción por ride id por vez es
/// responsabilidad del caller (cancelar antes de resuscribir).
#[derive(Debug)]
pub struct WatchHandle {
    cancelled: Arc<AtomicBool>,
    delivery: Arc<Mutex<()>>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Dar de baja la suscripción. Bloquea hasta que cualquier callback en
    /// vuelo termine; después de retornar no hay más invocaciones.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        let _guard = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Callback compartido entre la tarea de observación y el handle. El mutex
/// de delivery es lo que hace síncrona la cancelación: `cancel` lo toma
/// después de marcar la bandera, así que espera a un callback en curso y
/// corta los siguientes.
struct Sink {
    cancelled: Arc<AtomicBool>,
    delivery: Arc<Mutex<()>>,
    on_change: Arc<dyn Fn(StatusChange) + Send + Sync>,
}

impl Sink {
    fn deliver(&self, change: StatusChange) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }
        let _guard = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }
        (self.on_change)(change);
    }
}

/// Alta de una suscripción filtrada a `ride_id`.
///
/// `last_known` es el estado del snapshot inicial, leído por el caller con
/// `get_by_id` ANTES de llamar aquí. Suscripciones de rides distintos son
/// independientes; este componente no multiplexa entre ids.
pub fn subscribe<F>(
    store: Arc<dyn RideStore>,
    ride_id: Uuid,
    last_known: RideStatus,
    on_change: F,
) -> WatchHandle
where
    F: Fn(StatusChange) + Send + Sync + 'static,
{
    let rx = store.changes();
    let cancelled = Arc::new(AtomicBool::new(false));
    let delivery = Arc::new(Mutex::new(()));

    let sink = Sink {
        cancelled: cancelled.clone(),
        delivery: delivery.clone(),
        on_change: Arc::new(on_change),
    };

    let task = tokio::spawn(run(store, ride_id, last_known, rx, sink));

    WatchHandle {
        cancelled,
        delivery,
        task,
    }
}

async fn run(
    store: Arc<dyn RideStore>,
    ride_id: Uuid,
    mut last: RideStatus,
    rx: tokio::sync::broadcast::Receiver<crate::models::ride::RideChange>,
    sink: Sink,
) {
    let mut stream = BroadcastStream::new(rx);

    while let Some(item) = stream.next().await {
        match item {
            Ok(change) => {
                if change.ride.id != ride_id {
                    continue;
                }
                let next = change.ride.status;

                // Mismo estado: no-op idempotente, sin notificación
                if next == last {
                    continue;
                }

                if is_legal(last, next) {
                    let transition = Transition { from: last, to: next };
                    last = next;
                    sink.deliver(StatusChange {
                        ride: change.ride,
                        transition,
                    });
                } else {
                    // Estado inalcanzable desde el último conocido: el
                    // payload del evento no es de fiar, releer la fila
                    last = reconcile(store.as_ref(), ride_id, last, &sink).await;
                }
            }
            Err(BroadcastStreamRecvError::Lagged(missed)) => {
                log::warn!(
                    "Feed del ride {} se atrasó {} eventos, releyendo",
                    ride_id,
                    missed
                );
                last = reconcile(store.as_ref(), ride_id, last, &sink).await;
            }
        }
    }
}

/// Releer la fila completa y adoptarla como snapshot autoritativo
async fn reconcile(
    store: &dyn RideStore,
    ride_id: Uuid,
    last: RideStatus,
    sink: &Sink,
) -> RideStatus {
    match store.get_by_id(ride_id).await {
        Ok(Some(ride)) => {
            if ride.status == last {
                return last;
            }
            let transition = Transition {
                from: last,
                to: ride.status,
            };
            let next = ride.status;
            sink.deliver(StatusChange { ride, transition });
            next
        }
        Ok(None) => {
            log::warn!("Ride {} ya no existe en el store", ride_id);
            last
        }
        Err(e) => {
            log::error!("Error releyendo el ride {}: {}", ride_id, e);
            last
        }
    }
}
