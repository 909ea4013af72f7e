pub mod availability;
pub mod health;
pub mod medication;
pub mod notification;
pub mod patient;
