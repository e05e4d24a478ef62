//! Form validation.
//!
//! Each validator runs its rules in order and stops at the first failure;
//! the error's `Display` is the message shown next to the form.

use thiserror::Error;

use crate::location;
use crate::order::CustomerDetails;
use crate::types::Email;

/// Minimum length of the name and surname fields.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Fields of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub surnames: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// First registration rule that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Por favor, completa todos los campos.")]
    MissingFields,
    #[error("El nombre debe tener al menos 2 caracteres.")]
    NameTooShort,
    #[error("Los apellidos deben tener al menos 2 caracteres.")]
    SurnamesTooShort,
    #[error("Por favor, ingresa un correo electrónico válido.")]
    InvalidEmail,
    #[error("La contraseña debe tener al menos 6 caracteres.")]
    PasswordTooShort,
    #[error("Las contraseñas no coinciden.")]
    PasswordMismatch,
}

/// Validate the registration form.
///
/// Names and email are trimmed for the emptiness and length checks; the
/// email shape is checked on the value as typed.
///
/// # Errors
///
/// Returns the first rule that fails.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), RegistrationError> {
    let name = form.name.trim();
    let surnames = form.surnames.trim();

    if name.is_empty()
        || surnames.is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(RegistrationError::MissingFields);
    }

    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(RegistrationError::NameTooShort);
    }
    if surnames.chars().count() < MIN_NAME_LENGTH {
        return Err(RegistrationError::SurnamesTooShort);
    }

    if !Email::is_well_formed(&form.email) {
        return Err(RegistrationError::InvalidEmail);
    }

    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::PasswordTooShort);
    }

    if form.password != form.confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }

    Ok(())
}

/// Login form rejected before contacting the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Por favor, ingresa tu correo y contraseña.")]
pub struct MissingCredentials;

/// Validate the login form.
///
/// # Errors
///
/// Returns [`MissingCredentials`] when either field is empty.
pub fn validate_login(email: &str, password: &str) -> Result<(), MissingCredentials> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(MissingCredentials);
    }
    Ok(())
}

/// First checkout-details rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerDetailsError {
    #[error("Por favor, completa todos los campos.")]
    MissingFields,
    #[error("Por favor, ingresa un correo electrónico válido.")]
    InvalidEmail,
    #[error("La región {0} no existe.")]
    UnknownRegion(String),
    #[error("La comuna {commune} no pertenece a {region}.")]
    CommuneNotInRegion { region: String, commune: String },
}

/// Validate the checkout form. The apartment is optional.
///
/// # Errors
///
/// Returns the first rule that fails.
pub fn validate_customer_details(details: &CustomerDetails) -> Result<(), CustomerDetailsError> {
    let required = [
        &details.first_name,
        &details.last_names,
        &details.email,
        &details.street,
        &details.region,
        &details.commune,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(CustomerDetailsError::MissingFields);
    }

    if !Email::is_well_formed(details.email.trim()) {
        return Err(CustomerDetailsError::InvalidEmail);
    }

    if location::find_region(&details.region).is_none() {
        return Err(CustomerDetailsError::UnknownRegion(details.region.clone()));
    }
    if !location::is_commune_of(&details.region, &details.commune) {
        return Err(CustomerDetailsError::CommuneNotInRegion {
            region: details.region.clone(),
            commune: details.commune.clone(),
        });
    }

    Ok(())
}
