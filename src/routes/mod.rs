pub mod admin_routes;
pub mod auth_routes;
pub mod contact_routes;
pub mod driver_routes;
pub mod ride_routes;
