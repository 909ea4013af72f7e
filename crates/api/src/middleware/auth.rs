//! # Authentication Module
//!
//! Password hashing for patient registration and extraction of the doctor
//! identity forwarded by the authenticating proxy in front of this service.
//!
//! Doctors authenticate upstream; by the time a request reaches us the proxy
//! has replaced any client-supplied value with the verified account id in the
//! `X-Doctor-Id` header.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::http::HeaderMap;
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::availability::DoctorId,
};
use eyre::Result;

/// Header carrying the authenticated doctor's account id.
pub const DOCTOR_ID_HEADER: &str = "x-doctor-id";

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format (algorithm, version, parameters, salt and hash).
///
/// # Example
///
/// ```
/// use clinic_api::middleware::auth::hash_password;
///
/// let hashed = hash_password("correct horse battery staple").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Reads the doctor identity from the request headers.
///
/// Returns `Ok(None)` when the header is absent so that the caller decides
/// whether an identity is required. A header that is present but not a valid
/// positive integer is an authentication failure.
pub fn doctor_identity(headers: &HeaderMap) -> ClinicResult<Option<DoctorId>> {
    let Some(value) = headers.get(DOCTOR_ID_HEADER) else {
        return Ok(None);
    };

    let raw = value.to_str().map_err(|_| {
        ClinicError::Authentication(format!("{} header is not valid text", DOCTOR_ID_HEADER))
    })?;

    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(Some(DoctorId(id))),
        _ => Err(ClinicError::Authentication(format!(
            "{} header must be a positive integer",
            DOCTOR_ID_HEADER
        ))),
    }
}
