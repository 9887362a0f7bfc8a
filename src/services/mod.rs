pub mod active_ride;
pub mod auth_service;
pub mod email_service;
pub mod notifications;
pub mod ride_lifecycle;
pub mod ride_watch;
