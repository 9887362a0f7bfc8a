//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los DTOs de entrada.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    /// Teléfonos con prefijo internacional opcional, dígitos y separadores
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").unwrap();
}

/// Validar un número de contacto telefónico
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value.trim()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        Err(error)
    }
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Coordenada geográfica opcional dentro de rango
pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("latitude"))
    }
}

pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("longitude"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        assert!(validate_phone("+33 6 12 34 56 78").is_ok());
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
    }

    #[test]
    fn rejects_garbage_phones() {
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn validates_uuid_strings() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("nope").is_err());
    }

    #[test]
    fn coordinate_ranges() {
        assert!(validate_latitude(48.85).is_ok());
        assert!(validate_latitude(91.0).is_err());
        assert!(validate_longitude(2.35).is_ok());
        assert!(validate_longitude(-181.0).is_err());
    }
}
