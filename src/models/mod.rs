pub mod driver_application;
pub mod ride;
pub mod user;
