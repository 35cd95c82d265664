pub mod bookings;
pub mod catalog;
pub mod clients;
pub mod finance;
pub mod health;
pub mod salons;
pub mod stats;
pub mod workers;
