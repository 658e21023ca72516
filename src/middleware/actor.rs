//! Identidad del llamante
//!
//! El colaborador de sesión entrega la identidad en la cabecera `x-user-id`;
//! el núcleo la trata como una cadena opaca para la auditoría.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::utils::errors::AppError;

pub const ACTOR_HEADER: &str = "x-user-id";

/// Usuario que ejecuta la mutación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

impl Actor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Actor(value.to_string()))
            .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", ACTOR_HEADER)))
    }
}
