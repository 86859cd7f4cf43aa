pub mod appointments;
pub mod availability;
pub mod chat;
pub mod health;
pub mod schedule;
