//! Request and response bodies of the auth API

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{LanaError, LanaResult};

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// The email is trimmed and lowercased, the password sent as typed
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> LanaResult<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(LanaError::Validation(
                "Por favor, ingresa tu correo o contraseña".into(),
            ));
        }
        if !loose_email_regex().is_match(&self.email) {
            return Err(LanaError::Validation(
                "Por favor, ingresa un correo válido.".into(),
            ));
        }
        Ok(())
    }
}

/// A user as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub nombre_usuario: String,
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub foto_perfil: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
}

/// Successful login: a bearer token and the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// Body of `POST /lanaapp/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCreateRequest {
    pub nombre_usuario: String,
    pub email: String,
    pub password: String,
    pub telefono: String,
}

impl UserCreateRequest {
    /// Name, email and phone are trimmed; the email is lowercased
    pub fn new(name: &str, email: &str, password: &str, phone: &str) -> Self {
        Self {
            nombre_usuario: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
            telefono: phone.trim().to_string(),
        }
    }

    /// Checks run before anything is sent, in the order the form runs them
    pub fn validate(&self) -> LanaResult<()> {
        let invalid = |message: &str| Err(LanaError::Validation(message.to_string()));

        if self.nombre_usuario.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.telefono.is_empty()
        {
            return invalid("Por favor, llena todos los campos requeridos");
        }
        if !loose_email_regex().is_match(&self.email) {
            return invalid("Por favor, ingresa un correo válido.");
        }
        if self.nombre_usuario.chars().count() < 3 {
            return invalid("El nombre de usuario debe tener al menos 3 caracteres.");
        }
        if self.password.chars().count() < 6 {
            return invalid("La contraseña debe tener al menos 6 caracteres.");
        }
        if !phone_regex().is_match(&self.telefono) {
            return invalid("Por favor, ingresa un número de teléfono válido.");
        }
        Ok(())
    }
}

fn loose_email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("hardcoded email regex should be valid"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^\+?[\d\s\-\(\)]{10,}$").expect("hardcoded phone regex should be valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: LanaResult<()>) -> String {
        match result {
            Err(LanaError::Validation(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_login_request_normalizes_email() {
        let request = LoginRequest::new("  Ana@Correo.MX ", "secreto");
        assert_eq!(request.email, "ana@correo.mx");
        assert_eq!(request.password, "secreto");
        assert!(request.validate().is_ok());

        assert_eq!(
            message(LoginRequest::new("ana", "secreto").validate()),
            "Por favor, ingresa un correo válido."
        );
        assert!(LoginRequest::new("", "x").validate().is_err());
    }

    #[test]
    fn test_register_validation_order() {
        let ok = UserCreateRequest::new(" Ana ", "ana@correo.mx", "secreto", "+52 55 1234 5678");
        assert!(ok.validate().is_ok());
        assert_eq!(ok.nombre_usuario, "Ana");

        assert_eq!(
            message(UserCreateRequest::new("Ana", "ana@correo.mx", "secreto", "").validate()),
            "Por favor, llena todos los campos requeridos"
        );
        assert_eq!(
            message(UserCreateRequest::new("Al", "ana@correo.mx", "secreto", "5512345678").validate()),
            "El nombre de usuario debe tener al menos 3 caracteres."
        );
        assert_eq!(
            message(UserCreateRequest::new("Ana", "ana@correo.mx", "12345", "5512345678").validate()),
            "La contraseña debe tener al menos 6 caracteres."
        );
        assert_eq!(
            message(UserCreateRequest::new("Ana", "ana@correo.mx", "secreto", "55-12").validate()),
            "Por favor, ingresa un número de teléfono válido."
        );
    }

    #[test]
    fn test_login_response_parses_optional_fields() {
        let json = r#"{
            "access_token": "abc.def",
            "token_type": "bearer",
            "user": {"id": 7, "nombre_usuario": "Ana", "email": "ana@correo.mx"}
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.id, 7);
        assert_eq!(response.user.telefono, None);
    }
}
