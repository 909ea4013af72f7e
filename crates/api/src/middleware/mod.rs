/// Password hashing and caller identity extraction
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
