pub mod driver_application_repository;
pub mod ride_repository;
pub mod user_repository;
