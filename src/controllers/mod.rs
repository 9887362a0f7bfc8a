pub mod admin_controller;
pub mod auth_controller;
pub mod driver_controller;
pub mod ride_controller;
