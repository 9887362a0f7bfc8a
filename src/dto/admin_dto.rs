use serde::Serialize;

// Contadores del dashboard administrativo
#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub total_users: i64,
    pub total_rides: i64,
    pub pending_rides: i64,
    pub completed_rides: i64,
    pub total_drivers: i64,
    pub pending_drivers: i64,
}
