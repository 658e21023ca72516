//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs (`#[validate(custom = ...)]`) y por
//! los controladores.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Formatos aceptados: AB-123-CD, 1234-ABC, 123 TU 4567...
    static ref IMMATRICULATION_RE: Regex =
        Regex::new(r"^[A-Z0-9]{1,4}([ -]?[A-Z0-9]{1,4}){1,3}$").expect("immatriculation regex");
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 8 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_immatriculation(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    let compact_len = normalized.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    if !(4..=12).contains(&compact_len) || !IMMATRICULATION_RE.is_match(&normalized) {
        let mut error = ValidationError::new("immatriculation");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normaliza una matrícula para comparaciones de unicidad
pub fn normalize_immatriculation(value: &str) -> String {
    value.trim().to_uppercase()
}
