//! Remote auth API
//!
//! Login and account creation against the Lana backend, plus the local
//! session file written after a successful login.

pub mod client;
pub mod session;
pub mod types;

pub use client::{AuthClient, Endpoint};
pub use session::{Session, SessionStore};
pub use types::{LoginRequest, LoginResponse, UserCreateRequest, UserResponse};
