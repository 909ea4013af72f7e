//! Postgres-backed repositories.
//!
//! Each module exposes plain `pool`-taking functions plus a trait over them.
//! Handlers depend on the traits so tests can swap in the generated
//! `Mock*Repository` types.

pub mod availability_slot;
pub mod medication;
pub mod notification_template;
pub mod patient;
