//! Repositorio de rides
//!
//! Acceso tipado a la tabla `rides`. El trait `RideStore` existe para que
//! los tests puedan sustituir el store real por uno en memoria; la
//! implementación de producción corre sobre PostgreSQL y publica cada
//! actualización confirmada en el feed de cambios (canal broadcast).

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::ride::{NewRide, Ride, RideChange, RideRow, RideStatus};
use crate::utils::errors::{AppError, AppResult};

/// Abstracción del store de rides.
///
/// Las escrituras son crudas: la legalidad de las transiciones se valida
/// en el servicio de ciclo de vida ANTES de llamar a `update_status`, de
/// modo que el store nunca se muta en una transición ilegal.
#[async_trait]
pub trait RideStore: Send + Sync {
    /// Insertar un ride nuevo con status=pending
    async fn create(&self, owner: Uuid, booking: NewRide) -> AppResult<Ride>;

    /// Lectura puntual por identificador
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Ride>>;

    /// Ride activo más reciente del dueño (status pending o en-route)
    async fn find_active_for_owner(&self, owner: Uuid) -> AppResult<Option<Ride>>;

    /// Escritura cruda del status; asigna updated_at y publica el evento
    async fn update_status(&self, id: Uuid, new_status: RideStatus) -> AppResult<Ride>;

    /// Borrado administrativo, irreversible
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Todos los rides, más recientes primero
    async fn list_all(&self) -> AppResult<Vec<Ride>>;

    /// Receptor del feed de cambios; cada suscriptor filtra por ride id
    fn changes(&self) -> broadcast::Receiver<RideChange>;
}

pub struct RideRepository {
    pool: PgPool,
    changes_tx: broadcast::Sender<RideChange>,
}

impl RideRepository {
    pub fn new(pool: PgPool, changes_tx: broadcast::Sender<RideChange>) -> Self {
        Self { pool, changes_tx }
    }
}

#[async_trait]
impl RideStore for RideRepository {
    async fn create(&self, owner: Uuid, booking: NewRide) -> AppResult<Ride> {
        let row = sqlx::query_as::<_, RideRow>(
            r#"
            INSERT INTO rides (id, user_id, name, contact, vehicle_type, issue_description,
                               location_address, location_lat, location_lng, status,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', now(), now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(booking.name)
        .bind(booking.contact)
        .bind(booking.vehicle_type.as_str())
        .bind(booking.issue_description)
        .bind(booking.location_address)
        .bind(booking.location_lat)
        .bind(booking.location_lng)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let row = sqlx::query_as::<_, RideRow>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Ride::try_from).transpose()
    }

    async fn find_active_for_owner(&self, owner: Uuid) -> AppResult<Option<Ride>> {
        let row = sqlx::query_as::<_, RideRow>(
            r#"
            SELECT * FROM rides
            WHERE user_id = $1 AND status IN ('pending', 'en-route')
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Ride::try_from).transpose()
    }

    async fn update_status(&self, id: Uuid, new_status: RideStatus) -> AppResult<Ride> {
        // updated_at lo asigna el store; nunca se ordena por timestamps locales
        let row = sqlx::query_as::<_, RideRow>(
            r#"
            UPDATE rides
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ride with id '{}' not found", id)))?;

        let ride: Ride = row.try_into()?;

        // Publicar la fila nueva completa en el feed. Sin suscriptores el
        // send falla y se ignora: no es un error del caller.
        let _ = self.changes_tx.send(RideChange { ride: ride.clone() });

        Ok(ride)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rides WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Ride with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Ride>> {
        let rows =
            sqlx::query_as::<_, RideRow>("SELECT * FROM rides ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Ride::try_from).collect()
    }

    fn changes(&self) -> broadcast::Receiver<RideChange> {
        self.changes_tx.subscribe()
    }
}
