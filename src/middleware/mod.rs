//! Middleware del sistema
//!
//! CORS y extracción de la identidad del llamante.

pub mod actor;
pub mod cors;

pub use actor::*;
pub use cors::*;
