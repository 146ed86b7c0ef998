//! Login request and response shapes.

use serde::{Deserialize, Serialize};

use crate::session::BearerToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful `POST /api/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: BearerToken,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
