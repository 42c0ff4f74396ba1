//! Blocking client for the auth API
//!
//! One request per call, no retries. Failures come back as `LanaError::Api`
//! carrying a message fit to show the user.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use super::types::{LoginRequest, LoginResponse, UserCreateRequest, UserResponse};
use crate::error::{LanaError, LanaResult};

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const LOGIN_PATH: &str = "/login";
pub const USERS_PATH: &str = "/lanaapp/user";

pub const CONNECTION_ERROR: &str = "Error de conexión. Verifica tu red e intenta de nuevo.";
pub const INVALID_CREDENTIALS: &str = "Credenciales incorrectas";

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Which endpoint a failed response came from; each maps statuses differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
}

#[derive(Debug)]
pub struct AuthClient {
    base_url: String,
    http: Client,
}

impl AuthClient {
    pub fn new(base_url: &str) -> LanaResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LanaError::Api(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /login` with a JSON body
    pub fn login(&self, email: &str, password: &str) -> LanaResult<LoginResponse> {
        let request = LoginRequest::new(email, password);
        request.validate()?;

        let url = self.url(LOGIN_PATH);
        debug!(%url, email = %request.email, "login request");
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .map_err(connection_error)?;

        let login: LoginResponse = parse_success(response, Endpoint::Login)?;
        info!(user = login.user.id, "logged in");
        Ok(login)
    }

    /// `POST /lanaapp/user` creating a new account
    pub fn register(&self, request: &UserCreateRequest) -> LanaResult<UserResponse> {
        request.validate()?;

        let url = self.url(USERS_PATH);
        debug!(%url, email = %request.email, "register request");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(connection_error)?;

        let user: UserResponse = parse_success(response, Endpoint::Register)?;
        info!(user = user.id, "account created");
        Ok(user)
    }
}

fn connection_error(err: reqwest::Error) -> LanaError {
    debug!(error = %err, "request failed");
    LanaError::Api(CONNECTION_ERROR.to_string())
}

fn parse_success<T: serde::de::DeserializeOwned>(
    response: Response,
    endpoint: Endpoint,
) -> LanaResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .map_err(|e| LanaError::Api(format!("Respuesta inválida del servidor: {}", e)));
    }

    let body = response.text().unwrap_or_default();
    Err(LanaError::Api(error_message(endpoint, status, &body)))
}

/// User-facing message for a non-2xx response
pub fn error_message(endpoint: Endpoint, status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });

    match endpoint {
        Endpoint::Login => detail.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
        Endpoint::Register => match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                "Error de validación: Verifica que todos los datos sean correctos".to_string()
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                "Error interno del servidor. Por favor, intenta más tarde.".to_string()
            }
            _ => detail.unwrap_or_else(|| {
                format!(
                    "Error {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_uses_detail() {
        assert_eq!(
            error_message(Endpoint::Login, StatusCode::UNAUTHORIZED, r#"{"detail": "Usuario no encontrado"}"#),
            "Usuario no encontrado"
        );
        assert_eq!(
            error_message(Endpoint::Login, StatusCode::UNAUTHORIZED, "<html>"),
            INVALID_CREDENTIALS
        );
    }

    #[test]
    fn test_register_error_by_status() {
        assert_eq!(
            error_message(Endpoint::Register, StatusCode::UNPROCESSABLE_ENTITY, "{}"),
            "Error de validación: Verifica que todos los datos sean correctos"
        );
        assert_eq!(
            error_message(Endpoint::Register, StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Error interno del servidor. Por favor, intenta más tarde."
        );
        assert_eq!(
            error_message(Endpoint::Register, StatusCode::CONFLICT, ""),
            "Error 409: Conflict"
        );
        assert_eq!(
            error_message(Endpoint::Register, StatusCode::BAD_REQUEST, r#"{"detail": "Email ya registrado"}"#),
            "Email ya registrado"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = AuthClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(LOGIN_PATH), "http://localhost:8000/login");
    }

    #[test]
    fn test_invalid_login_is_rejected_before_sending() {
        let client = AuthClient::new("http://127.0.0.1:9").unwrap();
        let err = client.login("sin-arroba", "secreto").unwrap_err();
        assert!(matches!(err, LanaError::Validation(_)));
    }

    #[test]
    fn test_unreachable_server_is_a_connection_error() {
        let client = AuthClient::new("http://127.0.0.1:9").unwrap();
        let err = client.login("ana@correo.mx", "secreto").unwrap_err();
        assert_eq!(err.to_string(), format!("API error: {}", CONNECTION_ERROR));
    }
}
