//! # Clinic Core
//!
//! Domain types shared by the persistence and HTTP layers, plus the two pure
//! pieces of business logic the rest of the workspace leans on:
//!
//! - [`slot::SlotBuilder`] turns an availability request into a bookable slot
//! - [`template::render`] fills `{{placeholder}}` tokens in notification text
//!
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod models;
pub mod slot;
pub mod template;
pub mod validation;
