pub mod availability;
pub mod medication;
pub mod notification;
pub mod patient;
