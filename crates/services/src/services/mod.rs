pub mod booking;
pub mod finance;
pub mod stats;
