//! Tests de extremo a extremo del ciclo de vida de rides sobre el store
//! en memoria: tabla de transiciones, resolución de ride activo,
//! suscripciones y notificaciones.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;

use common::{booking, MemoryRideStore};
use towing_dispatch::models::ride::RideStatus;
use towing_dispatch::repositories::ride_repository::RideStore;
use towing_dispatch::services::active_ride::ActiveRideResolver;
use towing_dispatch::services::notifications;
use towing_dispatch::services::ride_lifecycle::{RideLifecycle, StatusUpdate};
use towing_dispatch::services::ride_watch::StatusChange;
use towing_dispatch::utils::errors::AppError;

/// Colector de snapshots entregados a un suscriptor
fn collector() -> (
    Arc<Mutex<Vec<StatusChange>>>,
    impl Fn(StatusChange) + Send + Sync + 'static,
) {
    let seen: Arc<Mutex<Vec<StatusChange>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |change| sink.lock().unwrap().push(change))
}

/// Dejar correr la tarea de observación
async fn settle() {
    tokio::time::sleep(Duration::from_millis(30)).await;
}

#[tokio::test]
async fn scenario_a_subscriber_sees_en_route_with_message() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();
    assert_eq!(ride.status, RideStatus::Pending);

    let (seen, on_change) = collector();
    let (initial, _handle) = lifecycle.track(ride.id, on_change).await.unwrap();
    assert_eq!(initial.status, RideStatus::Pending);

    // Actualización externa (un admin despacha la grúa)
    lifecycle
        .update_status(ride.id, RideStatus::EnRoute)
        .await
        .unwrap();
    settle().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].ride.status, RideStatus::EnRoute);
    assert_eq!(
        notifications::describe(&seen[0].transition),
        "Your driver is on the way!"
    );
}

#[tokio::test]
async fn scenario_b_active_ride_is_the_newest_non_terminal() {
    let store = Arc::new(MemoryRideStore::new());
    let resolver = ActiveRideResolver::new(store.clone());

    let owner = Uuid::new_v4();
    let older = store.create(owner, booking("Ana")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = store.create(owner, booking("Ana")).await.unwrap();

    let active = resolver.resolve(owner).await.unwrap().unwrap();
    assert_eq!(active.id, newer.id);

    // Completado el más nuevo, el activo vuelve a ser el anterior
    store
        .update_status(newer.id, RideStatus::Completed)
        .await
        .unwrap();
    let active = resolver.resolve(owner).await.unwrap().unwrap();
    assert_eq!(active.id, older.id);
}

#[tokio::test]
async fn resolver_returns_none_iff_no_non_terminal_rides() {
    let store = Arc::new(MemoryRideStore::new());
    let resolver = ActiveRideResolver::new(store.clone());

    let owner = Uuid::new_v4();
    assert!(resolver.resolve(owner).await.unwrap().is_none());

    let ride = store.create(owner, booking("Luis")).await.unwrap();
    assert!(resolver.resolve(owner).await.unwrap().is_some());

    store
        .update_status(ride.id, RideStatus::Completed)
        .await
        .unwrap();
    assert!(resolver.resolve(owner).await.unwrap().is_none());

    // Los rides de otros dueños no cuentan
    let other = Uuid::new_v4();
    store.create(other, booking("Eva")).await.unwrap();
    assert!(resolver.resolve(owner).await.unwrap().is_none());
}

#[tokio::test]
async fn scenario_c_completed_is_terminal_and_store_untouched() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();

    // Completado directo desde pending es legal (cancelación)
    lifecycle
        .update_status(ride.id, RideStatus::Completed)
        .await
        .unwrap();

    let before = store.get_by_id(ride.id).await.unwrap().unwrap();

    let err = lifecycle
        .update_status(ride.id, RideStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: RideStatus::Completed,
            to: RideStatus::Pending,
        }
    ));

    // El store no se mutó: mismo estado y mismo updated_at
    let after = store.get_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(after.status, RideStatus::Completed);
    assert_eq!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn scenario_d_no_callbacks_after_cancel() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();

    let (seen, on_change) = collector();
    let (_initial, handle) = lifecycle.track(ride.id, on_change).await.unwrap();

    handle.cancel();
    assert!(handle.is_cancelled());

    // Actualización externa después de cancelar
    store
        .update_status(ride.id, RideStatus::EnRoute)
        .await
        .unwrap();
    settle().await;

    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn events_apply_in_arrival_order() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();

    let (seen, on_change) = collector();
    let (_initial, _handle) = lifecycle.track(ride.id, on_change).await.unwrap();

    // E1 y luego E2, entregados en ese orden
    lifecycle
        .update_status(ride.id, RideStatus::EnRoute)
        .await
        .unwrap();
    lifecycle
        .update_status(ride.id, RideStatus::Completed)
        .await
        .unwrap();
    settle().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].ride.status, RideStatus::EnRoute);
    assert_eq!(seen[1].ride.status, RideStatus::Completed);
    // El estado final observado nunca revierte a en-route
    assert_eq!(seen.last().unwrap().ride.status, RideStatus::Completed);
}

#[tokio::test]
async fn same_status_is_an_idempotent_no_op() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();

    let (seen, on_change) = collector();
    let (_initial, _handle) = lifecycle.track(ride.id, on_change).await.unwrap();

    let result = lifecycle
        .update_status(ride.id, RideStatus::Pending)
        .await
        .unwrap();
    assert!(matches!(result, StatusUpdate::Unchanged(_)));
    settle().await;

    // Sin escritura: updated_at intacto y ningún suscriptor notificado
    let after = store.get_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(after.updated_at, ride.updated_at);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_event_payload_forces_a_refetch() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride = store.create(owner, booking("Ana")).await.unwrap();
    store
        .update_status(ride.id, RideStatus::EnRoute)
        .await
        .unwrap();

    let (seen, on_change) = collector();
    let (initial, _handle) = lifecycle.track(ride.id, on_change).await.unwrap();
    assert_eq!(initial.status, RideStatus::EnRoute);

    // La fila real avanza a completed por fuera del feed...
    store.set_status_silently(ride.id, RideStatus::Completed);

    // ...y llega un evento viciado con un estado inalcanzable desde
    // en-route. El watcher no confía en el payload: relee la fila.
    let mut stale = ride.clone();
    stale.status = RideStatus::Pending;
    store.publish_raw(stale);
    settle().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].ride.status, RideStatus::Completed);
}

#[tokio::test]
async fn update_status_on_missing_ride_is_not_found() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store);

    let err = lifecycle
        .update_status(Uuid::new_v4(), RideStatus::EnRoute)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn subscriptions_for_different_rides_are_independent() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store.clone());

    let owner = Uuid::new_v4();
    let ride_a = store.create(owner, booking("Ana")).await.unwrap();
    let ride_b = store.create(owner, booking("Ana")).await.unwrap();

    let (seen_a, on_change_a) = collector();
    let (seen_b, on_change_b) = collector();
    let (_ia, _ha) = lifecycle.track(ride_a.id, on_change_a).await.unwrap();
    let (_ib, _hb) = lifecycle.track(ride_b.id, on_change_b).await.unwrap();

    lifecycle
        .update_status(ride_a.id, RideStatus::EnRoute)
        .await
        .unwrap();
    settle().await;

    assert_eq!(seen_a.lock().unwrap().len(), 1);
    assert!(seen_b.lock().unwrap().is_empty());
}

#[tokio::test]
async fn tracking_a_missing_ride_is_not_found() {
    let store = Arc::new(MemoryRideStore::new());
    let lifecycle = RideLifecycle::new(store);

    let err = lifecycle
        .track(Uuid::new_v4(), |_change| {})
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
