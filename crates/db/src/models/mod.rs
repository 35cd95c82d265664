pub mod booking;
pub mod catalog;
pub mod client;
pub mod finance;
pub mod salon;
pub mod worker;
